use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::naming::{AnimeNumbering, MultiEpStyle, NameRenderer};
use crate::parser::ParserConfig;
use crate::quality::Quality;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Naming patterns and numbering styles
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamingConfig {
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default = "default_abd_pattern")]
    pub abd_pattern: String,
    #[serde(default = "default_sports_pattern")]
    pub sports_pattern: String,
    #[serde(default = "default_anime_pattern")]
    pub anime_pattern: String,
    #[serde(default)]
    pub multi_ep_style: MultiEpStyle,
    #[serde(default)]
    pub anime_numbering: AnimeNumbering,
    /// Drop a trailing `(year)` from show names.
    #[serde(default)]
    pub strip_year: bool,
    /// Use `abd_pattern` for air-by-date shows.
    #[serde(default)]
    pub custom_abd: bool,
    /// Use `sports_pattern` for sports shows.
    #[serde(default)]
    pub custom_sports: bool,
    /// Use `anime_pattern` for anime shows.
    #[serde(default)]
    pub custom_anime: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            abd_pattern: default_abd_pattern(),
            sports_pattern: default_sports_pattern(),
            anime_pattern: default_anime_pattern(),
            multi_ep_style: MultiEpStyle::default(),
            anime_numbering: AnimeNumbering::default(),
            strip_year: false,
            custom_abd: false,
            custom_sports: false,
            custom_anime: false,
        }
    }
}

impl NamingConfig {
    /// Renderer for regular shows.
    pub fn renderer(&self) -> NameRenderer {
        NameRenderer::new(self.multi_ep_style, AnimeNumbering::Standard)
            .with_strip_year(self.strip_year)
    }

    /// Renderer for anime shows.
    pub fn anime_renderer(&self) -> NameRenderer {
        NameRenderer::new(self.multi_ep_style, self.anime_numbering)
            .with_strip_year(self.strip_year)
    }

    /// The pattern to use for a show of the given kind.
    pub fn pattern_for(&self, air_by_date: bool, sports: bool, anime: bool) -> &str {
        if air_by_date && self.custom_abd {
            &self.abd_pattern
        } else if sports && self.custom_sports {
            &self.sports_pattern
        } else if anime && self.custom_anime {
            &self.anime_pattern
        } else {
            &self.pattern
        }
    }
}

fn default_pattern() -> String {
    "%SN - %Sx%0E - %EN".to_string()
}

fn default_abd_pattern() -> String {
    "%SN - %A.D - %EN".to_string()
}

fn default_sports_pattern() -> String {
    "%SN - %A-D - %EN".to_string()
}

fn default_anime_pattern() -> String {
    "Season %0S/%SN - S%0SE%0E - %EN".to_string()
}

/// Search result policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Acceptable qualities, most preferred first.
    #[serde(default = "default_quality_preference")]
    pub quality_preference: Vec<Quality>,
    #[serde(default = "default_min_seeders")]
    pub min_seeders: u32,
    #[serde(default)]
    pub min_leechers: u32,
    /// Words that reject a release. `regex:` entries are patterns.
    #[serde(default)]
    pub ignore_words: Vec<String>,
    /// Words a release must contain. `regex:` entries are patterns.
    #[serde(default)]
    pub require_words: Vec<String>,
    #[serde(default = "default_true")]
    pub reject_nuked: bool,
    #[serde(default)]
    pub freeleech_only: bool,
    #[serde(default)]
    pub verified_only: bool,
    /// Let a season pack satisfy a single wanted episode.
    #[serde(default = "default_true")]
    pub allow_season_packs: bool,
    /// Per-provider search timeout in seconds (default: 30)
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quality_preference: default_quality_preference(),
            min_seeders: default_min_seeders(),
            min_leechers: 0,
            ignore_words: Vec::new(),
            require_words: Vec::new(),
            reject_nuked: true,
            freeleech_only: false,
            verified_only: false,
            allow_season_packs: true,
            provider_timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_quality_preference() -> Vec<Quality> {
    vec![
        Quality::FullHdWebDl,
        Quality::FullHdBluRay,
        Quality::FullHdTv,
        Quality::HdWebDl,
        Quality::HdBluRay,
        Quality::HdTv,
        Quality::SdTv,
        Quality::SdDvd,
    ]
}

fn default_min_seeders() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_provider_timeout() -> u64 {
    30
}
