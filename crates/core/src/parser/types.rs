//! Parser result and error types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quality::Quality;

/// Recoverable parse outcomes.
///
/// None of these indicate a bug; callers treat them as "not an episode".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("release name is empty")]
    Empty,

    #[error("could not determine episode numbering for {0}")]
    NoNumbering(String),

    #[error("invalid air date in {name}: {year}-{month}-{day}")]
    InvalidDate {
        name: String,
        year: i32,
        month: u32,
        day: u32,
    },
}

/// The primary numbering scheme of a release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Numbering {
    /// Season plus episodes; no episodes means a season pack.
    Season { season: u32, episodes: Vec<u32> },
    /// Identified by broadcast date.
    AirDate { date: NaiveDate },
    /// Running episode counter, mostly anime.
    Absolute { numbers: Vec<u32> },
}

/// Structured data extracted from a release name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRelease {
    /// The input as given.
    pub original_name: String,
    /// Cleaned show name guess, if any text preceded the numbering.
    pub series_name: Option<String>,
    /// `series_name` split on whitespace.
    pub show_name_tokens: Vec<String>,
    pub numbering: Numbering,
    pub quality: Quality,
    pub is_proper: bool,
    /// 1 for a first release, 2+ for propers/repacks or explicit `v2` tags.
    pub version: u32,
    pub release_group: Option<String>,
    /// Text between the numbering and the release group.
    pub extra_info: Option<String>,
    /// Best-effort episode title guess.
    pub episode_name: Option<String>,
}

impl ParsedRelease {
    pub fn season_number(&self) -> Option<u32> {
        match &self.numbering {
            Numbering::Season { season, .. } => Some(*season),
            _ => None,
        }
    }

    pub fn episode_numbers(&self) -> &[u32] {
        match &self.numbering {
            Numbering::Season { episodes, .. } => episodes,
            _ => &[],
        }
    }

    pub fn air_date(&self) -> Option<NaiveDate> {
        match &self.numbering {
            Numbering::AirDate { date } => Some(*date),
            _ => None,
        }
    }

    pub fn absolute_numbers(&self) -> &[u32] {
        match &self.numbering {
            Numbering::Absolute { numbers } => numbers,
            _ => &[],
        }
    }

    /// A whole season in one release.
    pub fn is_season_pack(&self) -> bool {
        matches!(&self.numbering, Numbering::Season { episodes, .. } if episodes.is_empty())
    }

    pub fn is_air_by_date(&self) -> bool {
        matches!(self.numbering, Numbering::AirDate { .. })
    }

    pub fn is_anime_numbering(&self) -> bool {
        matches!(self.numbering, Numbering::Absolute { .. })
    }
}
