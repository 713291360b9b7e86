//! Numbering and quality checks against a wanted episode.

use super::types::WantedNumbering;
use crate::parser::ParsedRelease;
use crate::quality::Quality;

/// `true` when the release covers every wanted episode.
///
/// Releases covering more than was asked for (multi-episode files) match.
/// Whole-season wants only match season packs.
pub fn numbering_matches_wanted(parsed: &ParsedRelease, wanted: &WantedNumbering) -> bool {
    match wanted {
        WantedNumbering::Season { season, episodes } => {
            if parsed.season_number() != Some(*season) {
                return false;
            }
            if episodes.is_empty() {
                return parsed.is_season_pack();
            }
            let found = parsed.episode_numbers();
            episodes.iter().all(|ep| found.contains(ep))
        }
        WantedNumbering::AirDate { date } => parsed.air_date() == Some(*date),
        WantedNumbering::Absolute { numbers } => {
            let found = parsed.absolute_numbers();
            !numbers.is_empty() && numbers.iter().all(|n| found.contains(n))
        }
    }
}

/// `true` when a season pack of the wanted season could stand in for the
/// wanted episodes.
pub fn season_pack_matches(parsed: &ParsedRelease, wanted: &WantedNumbering) -> bool {
    match wanted {
        WantedNumbering::Season { season, .. } => {
            parsed.is_season_pack() && parsed.season_number() == Some(*season)
        }
        _ => false,
    }
}

/// `true` when `quality` is one of the wanted qualities. Unknown quality is
/// never acceptable.
pub fn quality_acceptable(quality: Quality, wanted: &[Quality]) -> bool {
    quality != Quality::Unknown && wanted.contains(&quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::NameParser;
    use chrono::NaiveDate;

    fn parse(name: &str) -> ParsedRelease {
        NameParser::standard().parse(name).unwrap()
    }

    fn season(season: u32, episodes: &[u32]) -> WantedNumbering {
        WantedNumbering::Season {
            season,
            episodes: episodes.to_vec(),
        }
    }

    #[test]
    fn test_season_episode() {
        let parsed = parse("Show.Name.S02E03.720p.HDTV.x264-GROUP");
        assert!(numbering_matches_wanted(&parsed, &season(2, &[3])));
        assert!(!numbering_matches_wanted(&parsed, &season(2, &[4])));
        assert!(!numbering_matches_wanted(&parsed, &season(1, &[3])));
        assert!(!numbering_matches_wanted(&parsed, &season(2, &[3, 4])));
    }

    #[test]
    fn test_multi_episode_superset() {
        let parsed = parse("Show.Name.S02E01E02E03.720p.HDTV.x264-GROUP");
        assert!(numbering_matches_wanted(&parsed, &season(2, &[2])));
        assert!(numbering_matches_wanted(&parsed, &season(2, &[1, 3])));
    }

    #[test]
    fn test_season_pack() {
        let parsed = parse("Show.Name.S02.720p.HDTV.x264-GROUP");
        assert!(numbering_matches_wanted(&parsed, &season(2, &[])));
        assert!(!numbering_matches_wanted(&parsed, &season(2, &[3])));
        assert!(season_pack_matches(&parsed, &season(2, &[3])));
        assert!(!season_pack_matches(&parsed, &season(3, &[3])));

        let single = parse("Show.Name.S02E03.720p.HDTV.x264-GROUP");
        assert!(!numbering_matches_wanted(&single, &season(2, &[])));
    }

    #[test]
    fn test_air_date() {
        let parsed = parse("Show.Name.2011.03.09.HDTV.x264-GROUP");
        let date = NaiveDate::from_ymd_opt(2011, 3, 9).unwrap();
        assert!(numbering_matches_wanted(&parsed, &WantedNumbering::AirDate { date }));
        let other = NaiveDate::from_ymd_opt(2011, 3, 10).unwrap();
        assert!(!numbering_matches_wanted(&parsed, &WantedNumbering::AirDate { date: other }));
    }

    #[test]
    fn test_absolute() {
        let parsed = NameParser::anime()
            .parse("[Group] Show Name - 12-13 [720p]")
            .unwrap();
        let wanted = WantedNumbering::Absolute { numbers: vec![13] };
        assert!(numbering_matches_wanted(&parsed, &wanted));
        let wanted = WantedNumbering::Absolute { numbers: vec![14] };
        assert!(!numbering_matches_wanted(&parsed, &wanted));
    }

    #[test]
    fn test_quality() {
        let wanted = [Quality::HdTv, Quality::HdWebDl];
        assert!(quality_acceptable(Quality::HdTv, &wanted));
        assert!(!quality_acceptable(Quality::SdTv, &wanted));
        assert!(!quality_acceptable(Quality::Unknown, &[Quality::Unknown]));
    }
}
