//! Naming pattern integration tests.
//!
//! These tests render episodes through naming patterns and parse the result
//! back with the release-name parser:
//! - Built-in presets
//! - Every multi-episode style
//! - Legacy settings migration
//! - Invalid patterns

use sickle_core::naming::{
    check_force_season_folders, check_valid_abd_naming, check_valid_naming,
    check_valid_sports_naming, derive_legacy_pattern, render, validate_detailed, AnimeNumbering,
    LegacyNamingSettings, MultiEpStyle, ValidateOptions, ValidationFailure, NAME_ABD_PRESETS,
    NAME_ANIME_PRESETS, NAME_PRESETS, NAME_SPORTS_PRESETS,
};
use sickle_core::parser::NameParser;
use sickle_core::testing::fixtures;

#[test]
fn test_presets_round_trip() {
    let mut failures = Vec::new();
    for preset in NAME_PRESETS.iter().chain(NAME_ANIME_PRESETS) {
        for style in MultiEpStyle::ALL {
            for numbering in AnimeNumbering::ALL {
                if !check_valid_naming(preset, style, numbering) {
                    failures.push(format!("{preset} {style:?} {numbering:?}"));
                }
            }
        }
    }
    assert!(failures.is_empty(), "{failures:#?}");

    for preset in NAME_ABD_PRESETS {
        assert!(check_valid_abd_naming(preset), "{preset}");
    }
    for preset in NAME_SPORTS_PRESETS {
        assert!(check_valid_sports_naming(preset), "{preset}");
    }
}

#[test]
fn test_every_multi_episode_style_round_trips() {
    for style in MultiEpStyle::ALL {
        assert!(
            check_valid_naming("%S.N.S%0SE%0E.%E.N", style, AnimeNumbering::Standard),
            "{style:?}"
        );
    }
}

#[test]
fn test_rendered_multi_episode_parses_back() {
    let ep = fixtures::multi_episode();
    let parser = NameParser::standard();

    for style in MultiEpStyle::ALL {
        let rendered = render("%S.N.S%0SE%0E.%E.N", &ep, style, AnimeNumbering::Standard);
        let parsed = parser
            .parse(&format!("{}.mkv", rendered.filename))
            .unwrap_or_else(|e| panic!("{style:?}: {e}"));
        assert_eq!(parsed.season_number(), Some(2), "{style:?}");
        assert_eq!(parsed.episode_numbers(), &[3, 4, 5], "{style:?}");
    }
}

#[test]
fn test_rendered_path_parses_back() {
    let ep = fixtures::sample_episode();
    let rendered = render(
        "Season %0S/%S.N.S%0SE%0E.%Q.N-%RG",
        &ep,
        MultiEpStyle::Repeat,
        AnimeNumbering::Standard,
    );
    assert_eq!(rendered.path(), "Season 02/Show.Name.S02E03.HD.TV-RLSGROUP");

    let parsed = NameParser::standard()
        .parse(&format!("{}.mkv", rendered.path()))
        .unwrap();
    assert_eq!(parsed.season_number(), Some(2));
    assert_eq!(parsed.episode_numbers(), &[3]);
}

#[test]
fn test_legacy_settings_produce_valid_patterns() {
    let settings = LegacyNamingSettings::default();
    let pattern = derive_legacy_pattern(&settings);
    assert_eq!(pattern, "%SN - %Sx%0E - %EN");
    assert!(check_valid_naming(
        &pattern,
        MultiEpStyle::Repeat,
        AnimeNumbering::Standard
    ));

    let settings = LegacyNamingSettings {
        season_folders_format: Some("Season %02d".to_string()),
        ..LegacyNamingSettings::default()
    };
    let pattern = derive_legacy_pattern(&settings);
    assert_eq!(pattern, "Season %0S/%SN - %Sx%0E - %EN");
    assert!(!check_force_season_folders(
        &pattern,
        MultiEpStyle::Repeat,
        AnimeNumbering::Standard
    ));
}

#[test]
fn test_season_only_in_folder_forces_season_folders() {
    let pattern = "Season %0S/%SN - %0E - %EN";
    assert!(check_force_season_folders(
        pattern,
        MultiEpStyle::Repeat,
        AnimeNumbering::Standard
    ));
}

#[test]
fn test_pattern_without_numbering_is_rejected() {
    let result = validate_detailed("%SN - %EN", &ValidateOptions::default());
    assert!(matches!(result, Err(ValidationFailure::Unparseable { .. })));
    assert!(!check_valid_naming(
        "%SN - %EN",
        MultiEpStyle::Repeat,
        AnimeNumbering::Standard
    ));
}
