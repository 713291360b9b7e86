use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::quality::Quality;

/// How the numbers of a multi-episode file are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiEpStyle {
    /// `S01E02E03E04`
    #[default]
    Repeat,
    /// `S01E02-03-04`
    Extend,
    /// `S01E02 - S01E03 - S01E04`
    Duplicate,
    /// `S01E02-04`
    LimitedExtend,
    /// `S01E02 - E03 - E04`
    SeparatedRepeat,
    /// `S01E02-E04`
    LimitedExtendEPrefixed,
}

impl MultiEpStyle {
    pub const ALL: [MultiEpStyle; 6] = [
        MultiEpStyle::Repeat,
        MultiEpStyle::Extend,
        MultiEpStyle::Duplicate,
        MultiEpStyle::LimitedExtend,
        MultiEpStyle::SeparatedRepeat,
        MultiEpStyle::LimitedExtendEPrefixed,
    ];

    /// Numeric code used by legacy configuration files.
    pub fn code(self) -> u32 {
        match self {
            MultiEpStyle::Repeat => 1,
            MultiEpStyle::Extend => 2,
            MultiEpStyle::Duplicate => 4,
            MultiEpStyle::LimitedExtend => 8,
            MultiEpStyle::SeparatedRepeat => 16,
            MultiEpStyle::LimitedExtendEPrefixed => 32,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.code() == code)
    }

    /// Forces `-` between episode numbers.
    pub(crate) fn extends(self) -> bool {
        matches!(
            self,
            MultiEpStyle::Extend | MultiEpStyle::LimitedExtend | MultiEpStyle::LimitedExtendEPrefixed
        )
    }

    /// Only the last related episode is written.
    pub(crate) fn is_limited(self) -> bool {
        matches!(
            self,
            MultiEpStyle::LimitedExtend | MultiEpStyle::LimitedExtendEPrefixed
        )
    }
}

/// Numbering written for anime episodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimeNumbering {
    /// Season/episode followed by the absolute number.
    Hybrid,
    /// Absolute number only.
    #[serde(rename = "absolute")]
    AbsoluteOnly,
    /// Season/episode only.
    #[default]
    Standard,
}

impl AnimeNumbering {
    pub const ALL: [AnimeNumbering; 3] = [
        AnimeNumbering::Hybrid,
        AnimeNumbering::AbsoluteOnly,
        AnimeNumbering::Standard,
    ];

    pub fn code(self) -> u32 {
        match self {
            AnimeNumbering::Hybrid => 1,
            AnimeNumbering::AbsoluteOnly => 2,
            AnimeNumbering::Standard => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|numbering| numbering.code() == code)
    }

    pub(crate) fn uses_absolute(self) -> bool {
        !matches!(self, AnimeNumbering::Standard)
    }
}

/// Everything a naming pattern can refer to for one episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeContext {
    pub show_name: String,
    pub is_anime: bool,
    pub air_by_date: bool,
    pub sports: bool,
    pub season: u32,
    pub episode: u32,
    pub absolute_number: u32,
    pub scene_season: u32,
    pub scene_episode: u32,
    pub scene_absolute_number: u32,
    /// Episode title.
    pub name: String,
    pub air_date: NaiveDate,
    pub quality: Quality,
    /// Name of the release the file came from, if known.
    pub release_name: String,
    pub is_proper: bool,
    pub version: u32,
    /// Further episodes contained in the same file.
    pub related: Vec<EpisodeContext>,
}

impl Default for EpisodeContext {
    fn default() -> Self {
        Self {
            show_name: String::new(),
            is_anime: false,
            air_by_date: false,
            sports: false,
            season: 0,
            episode: 0,
            absolute_number: 0,
            scene_season: 0,
            scene_episode: 0,
            scene_absolute_number: 0,
            name: String::new(),
            air_date: NaiveDate::default(),
            quality: Quality::Unknown,
            release_name: String::new(),
            is_proper: false,
            version: 1,
            related: Vec::new(),
        }
    }
}

impl EpisodeContext {
    /// A regular episode with scene numbering equal to the indexer numbering.
    pub fn new(show_name: impl Into<String>, season: u32, episode: u32, name: impl Into<String>) -> Self {
        Self {
            show_name: show_name.into(),
            season,
            episode,
            scene_season: season,
            scene_episode: episode,
            name: name.into(),
            ..Self::default()
        }
    }

    /// All episode numbers in the file, this one first.
    pub fn episode_numbers(&self) -> Vec<u32> {
        std::iter::once(self.episode)
            .chain(self.related.iter().map(|ep| ep.episode))
            .collect()
    }

    /// All absolute numbers in the file, this one first.
    pub fn absolute_numbers(&self) -> Vec<u32> {
        std::iter::once(self.absolute_number)
            .chain(self.related.iter().map(|ep| ep.absolute_number))
            .collect()
    }
}

/// A rendered episode path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedName {
    pub filename: String,
    /// Directory part; empty when the pattern has no folders.
    pub directory: String,
}

impl RenderedName {
    /// Directory and file name joined with `/`.
    pub fn path(&self) -> String {
        if self.directory.is_empty() {
            self.filename.clone()
        } else {
            format!("{}/{}", self.directory, self.filename)
        }
    }
}
