//! Search result filtering and ranking.
//!
//! Every provider hit goes through the same pipeline: provider flags, the
//! ignore/require word lists, the release-name parser, the show name, the
//! wanted numbering, the wanted quality and finally the peer thresholds.
//! Accepted hits are ranked best first and duplicates of the same release
//! collapse to the best-ranked copy.

mod matching;
mod peers;
mod rank;
mod show;
mod types;
mod words;

pub use matching::{numbering_matches_wanted, quality_acceptable, season_pack_matches};
pub use peers::peers_acceptable;
pub use rank::{dedupe, rank_key, sort_candidates};
pub use show::{normalize_show_name, ShowNameMatcher};
pub use types::*;
pub use words::{WordFilter, WordFilterError, WordRejection, BUILTIN_IGNORE_PATTERNS};

use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::metrics::{CANDIDATES_ACCEPTED, CANDIDATES_REJECTED};
use crate::parser::{NameParser, ParserConfig};
use crate::quality::Quality;

/// Applies the configured search policy to provider hits.
#[derive(Debug, Clone)]
pub struct ResultFilter {
    policy: SearchConfig,
    words: WordFilter,
    parser: NameParser,
    anime_parser: NameParser,
}

impl ResultFilter {
    pub fn new(policy: &SearchConfig, parser: &ParserConfig) -> Result<Self, WordFilterError> {
        let words = WordFilter::new(&policy.ignore_words, &policy.require_words)?;
        let parser = ParserConfig {
            anime: false,
            ..parser.clone()
        };
        let anime_parser = ParserConfig {
            anime: true,
            ..parser.clone()
        };
        Ok(Self {
            policy: policy.clone(),
            words,
            parser: NameParser::new(parser),
            anime_parser: NameParser::new(anime_parser),
        })
    }

    pub fn policy(&self) -> &SearchConfig {
        &self.policy
    }

    /// Qualities in preference order for `wanted`.
    fn preference<'a>(&'a self, wanted: &'a WantedEpisode) -> &'a [Quality] {
        if wanted.qualities.is_empty() {
            &self.policy.quality_preference
        } else {
            &wanted.qualities
        }
    }

    /// Judge every hit of one provider. The result is unsorted.
    pub fn evaluate(
        &self,
        hits: Vec<SearchHit>,
        wanted: &WantedEpisode,
        capabilities: &ProviderCapabilities,
    ) -> Vec<ScoredCandidate> {
        let matcher = if wanted.show_names.is_empty() {
            None
        } else {
            match ShowNameMatcher::new(&wanted.show_names) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    warn!(error = %e, "Failed to build show name matcher, skipping show check");
                    None
                }
            }
        };
        hits.into_iter()
            .map(|hit| self.evaluate_hit(hit, wanted, capabilities, matcher.as_ref()))
            .collect()
    }

    fn evaluate_hit(
        &self,
        hit: SearchHit,
        wanted: &WantedEpisode,
        capabilities: &ProviderCapabilities,
        matcher: Option<&ShowNameMatcher>,
    ) -> ScoredCandidate {
        let parser = if wanted.anime {
            &self.anime_parser
        } else {
            &self.parser
        };
        let parsed = parser.parse(&hit.title).ok();
        let preference = self.preference(wanted);
        let rank_key = match &parsed {
            Some(parsed) => rank_key(&hit, parsed, preference),
            None => RankKey {
                quality_rank: usize::MAX,
                version: 0,
                seeders: hit.seeders.unwrap_or(0),
            },
        };
        let mut candidate = ScoredCandidate {
            hit,
            parsed,
            accepted: true,
            rejection_reason: None,
            rank_key,
        };
        if let Some(reason) = self.rejection(&candidate, wanted, capabilities, matcher) {
            debug!(title = %candidate.hit.title, reason = %reason, "Rejected search result");
            candidate.reject(reason);
        }
        candidate
    }

    fn rejection(
        &self,
        candidate: &ScoredCandidate,
        wanted: &WantedEpisode,
        capabilities: &ProviderCapabilities,
        matcher: Option<&ShowNameMatcher>,
    ) -> Option<RejectionReason> {
        let hit = &candidate.hit;
        if self.policy.reject_nuked && hit.flags.nuked {
            return Some(RejectionReason::Nuked);
        }
        if self.policy.freeleech_only && !hit.flags.freeleech {
            return Some(RejectionReason::NotFreeleech);
        }
        if self.policy.verified_only && !hit.flags.verified {
            return Some(RejectionReason::Unverified);
        }
        match self.words.check(&hit.title) {
            Err(WordRejection::Ignored) => return Some(RejectionReason::IgnoredWord),
            Err(WordRejection::MissingRequired) => {
                return Some(RejectionReason::MissingRequiredWord)
            }
            Ok(()) => {}
        }

        let Some(parsed) = &candidate.parsed else {
            return Some(RejectionReason::Unparseable);
        };
        if let Some(matcher) = matcher {
            let show_ok = parsed
                .series_name
                .as_deref()
                .is_some_and(|name| matcher.is_match(name));
            if !show_ok {
                return Some(RejectionReason::WrongShow);
            }
        }
        if !numbering_matches_wanted(parsed, &wanted.numbering) {
            if !season_pack_matches(parsed, &wanted.numbering) {
                return Some(RejectionReason::WrongEpisode);
            }
            if !self.policy.allow_season_packs {
                return Some(RejectionReason::SeasonPack);
            }
        }
        if !quality_acceptable(parsed.quality, self.preference(wanted)) {
            return Some(RejectionReason::UnwantedQuality);
        }
        if !peers_acceptable(
            hit.seeders,
            hit.leechers,
            self.policy.min_seeders,
            self.policy.min_leechers,
            capabilities.seed_aware,
        ) {
            return Some(RejectionReason::NotEnoughPeers);
        }
        None
    }

    /// Split judged candidates into ranked, de-duplicated accepted ones and
    /// the rest.
    pub fn finish(&self, candidates: Vec<ScoredCandidate>) -> FilterOutcome {
        let (mut accepted, mut rejected): (Vec<_>, Vec<_>) =
            candidates.into_iter().partition(|c| c.accepted);

        sort_candidates(&mut accepted);
        let (accepted, duplicates) = dedupe(accepted);
        for mut duplicate in duplicates {
            duplicate.reject(RejectionReason::Duplicate);
            rejected.push(duplicate);
        }

        for candidate in &accepted {
            let quality = candidate
                .parsed
                .as_ref()
                .map_or(Quality::Unknown, |p| p.quality);
            CANDIDATES_ACCEPTED.with_label_values(&[quality.key()]).inc();
        }
        for candidate in &rejected {
            let reason = candidate
                .rejection_reason
                .unwrap_or(RejectionReason::Unparseable);
            CANDIDATES_REJECTED.with_label_values(&[reason.as_str()]).inc();
        }

        FilterOutcome { accepted, rejected }
    }

    /// Judge, rank and de-duplicate the hits of a single provider.
    pub fn filter(
        &self,
        hits: Vec<SearchHit>,
        wanted: &WantedEpisode,
        capabilities: &ProviderCapabilities,
    ) -> FilterOutcome {
        self.finish(self.evaluate(hits, wanted, capabilities))
    }
}
