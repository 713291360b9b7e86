//! Types for search result filtering.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::parser::ParsedRelease;
use crate::quality::Quality;

/// A raw result row returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    /// URL or magnet URI used to fetch the release.
    pub download_locator: String,
    /// `None` when the provider does not report it. Negative values in
    /// input are read as unknown.
    #[serde(default, deserialize_with = "unknown_if_negative")]
    pub seeders: Option<u32>,
    #[serde(default, deserialize_with = "unknown_if_negative")]
    pub leechers: Option<u32>,
    #[serde(default, deserialize_with = "unknown_if_negative")]
    pub size_bytes: Option<u64>,
    /// Name of the provider that returned the hit.
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub flags: HitFlags,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, download_locator: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            download_locator: download_locator.into(),
            seeders: None,
            leechers: None,
            size_bytes: None,
            provider: String::new(),
            flags: HitFlags::default(),
        }
    }

    pub fn with_peers(mut self, seeders: u32, leechers: u32) -> Self {
        self.seeders = Some(seeders);
        self.leechers = Some(leechers);
        self
    }
}

fn unknown_if_negative<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.and_then(|v| T::try_from(v).ok()))
}

/// Provider-specific markers, passed through opaquely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitFlags {
    pub nuked: bool,
    pub freeleech: bool,
    pub verified: bool,
}

/// What a provider is able to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderCapabilities {
    /// Seeder and leecher counts are reported; unknown counts are suspicious.
    pub seed_aware: bool,
    /// Whole-season queries are supported.
    pub season_search: bool,
}

impl Default for ProviderCapabilities {
    fn default() -> Self {
        Self {
            seed_aware: true,
            season_search: true,
        }
    }
}

/// The episode (or episodes) being searched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WantedEpisode {
    /// Show name followed by any aliases.
    pub show_names: Vec<String>,
    pub numbering: WantedNumbering,
    /// Acceptable qualities, most preferred first. Empty uses the configured
    /// preference.
    #[serde(default)]
    pub qualities: Vec<Quality>,
    #[serde(default)]
    pub anime: bool,
}

/// Numbering of a wanted episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WantedNumbering {
    /// No episodes means the whole season.
    Season {
        season: u32,
        #[serde(default)]
        episodes: Vec<u32>,
    },
    AirDate {
        date: NaiveDate,
    },
    Absolute {
        numbers: Vec<u32>,
    },
}

/// Why a hit was filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    Unparseable,
    IgnoredWord,
    MissingRequiredWord,
    WrongShow,
    WrongEpisode,
    SeasonPack,
    UnwantedQuality,
    NotEnoughPeers,
    Nuked,
    NotFreeleech,
    Unverified,
    Duplicate,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::Unparseable => "unparseable",
            RejectionReason::IgnoredWord => "ignored_word",
            RejectionReason::MissingRequiredWord => "missing_required_word",
            RejectionReason::WrongShow => "wrong_show",
            RejectionReason::WrongEpisode => "wrong_episode",
            RejectionReason::SeasonPack => "season_pack",
            RejectionReason::UnwantedQuality => "unwanted_quality",
            RejectionReason::NotEnoughPeers => "not_enough_peers",
            RejectionReason::Nuked => "nuked",
            RejectionReason::NotFreeleech => "not_freeleech",
            RejectionReason::Unverified => "unverified",
            RejectionReason::Duplicate => "duplicate",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key for accepted candidates. Greater is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankKey {
    /// Position in the quality preference; lower is preferred.
    pub quality_rank: usize,
    pub version: u32,
    pub seeders: u32,
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .quality_rank
            .cmp(&self.quality_rank)
            .then(self.version.cmp(&other.version))
            .then(self.seeders.cmp(&other.seeders))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A hit after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub hit: SearchHit,
    /// `None` when the title could not be parsed.
    pub parsed: Option<ParsedRelease>,
    pub accepted: bool,
    pub rejection_reason: Option<RejectionReason>,
    pub rank_key: RankKey,
}

impl ScoredCandidate {
    pub(crate) fn reject(&mut self, reason: RejectionReason) {
        self.accepted = false;
        self.rejection_reason = Some(reason);
    }
}

/// Result of filtering a batch of hits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Best first, one per distinct release.
    pub accepted: Vec<ScoredCandidate>,
    pub rejected: Vec<ScoredCandidate>,
}

impl FilterOutcome {
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.accepted.first()
    }
}
