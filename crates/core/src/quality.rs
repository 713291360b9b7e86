//! Release quality classification.
//!
//! Qualities combine resolution, source and codec into one value. Detection
//! first looks for a label this application writes itself (`720p WEB-DL`),
//! then falls back to a cascade over scene markers (`720p.HDTV.x264`).

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Quality of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    None,
    SdTv,
    SdDvd,
    HdTv,
    RawHdTv,
    FullHdTv,
    HdWebDl,
    FullHdWebDl,
    #[serde(rename = "hd_bluray")]
    HdBluRay,
    #[serde(rename = "full_hd_bluray")]
    FullHdBluRay,
    #[serde(rename = "uhd_4k_web")]
    Uhd4kWeb,
    Unknown,
}

/// Qualities in descending bit order, as checked during label detection.
const LABELLED: [Quality; 10] = [
    Quality::Uhd4kWeb,
    Quality::FullHdBluRay,
    Quality::HdBluRay,
    Quality::FullHdWebDl,
    Quality::HdWebDl,
    Quality::FullHdTv,
    Quality::RawHdTv,
    Quality::HdTv,
    Quality::SdDvd,
    Quality::SdTv,
];

impl Quality {
    /// All qualities, lowest bit first.
    pub const ALL: [Quality; 12] = [
        Quality::None,
        Quality::SdTv,
        Quality::SdDvd,
        Quality::HdTv,
        Quality::RawHdTv,
        Quality::FullHdTv,
        Quality::HdWebDl,
        Quality::FullHdWebDl,
        Quality::HdBluRay,
        Quality::FullHdBluRay,
        Quality::Uhd4kWeb,
        Quality::Unknown,
    ];

    /// Bit value used when qualities are combined into masks.
    pub fn bits(self) -> u32 {
        match self {
            Quality::None => 0,
            Quality::SdTv => 1,
            Quality::SdDvd => 1 << 1,
            Quality::HdTv => 1 << 2,
            Quality::RawHdTv => 1 << 3,
            Quality::FullHdTv => 1 << 4,
            Quality::HdWebDl => 1 << 5,
            Quality::FullHdWebDl => 1 << 6,
            Quality::HdBluRay => 1 << 7,
            Quality::FullHdBluRay => 1 << 8,
            Quality::Uhd4kWeb => 1 << 10,
            Quality::Unknown => 1 << 15,
        }
    }

    /// Human readable label, also used by the `%QN` naming token.
    pub fn label(self) -> &'static str {
        match self {
            Quality::None => "N/A",
            Quality::SdTv => "SD TV",
            Quality::SdDvd => "SD DVD",
            Quality::HdTv => "HD TV",
            Quality::RawHdTv => "RawHD TV",
            Quality::FullHdTv => "1080p HD TV",
            Quality::HdWebDl => "720p WEB-DL",
            Quality::FullHdWebDl => "1080p WEB-DL",
            Quality::HdBluRay => "720p BluRay",
            Quality::FullHdBluRay => "1080p BluRay",
            Quality::Uhd4kWeb => "2160p UHD 4K WEB",
            Quality::Unknown => "Unknown",
        }
    }

    /// Stable snake_case key, matching the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            Quality::None => "none",
            Quality::SdTv => "sd_tv",
            Quality::SdDvd => "sd_dvd",
            Quality::HdTv => "hd_tv",
            Quality::RawHdTv => "raw_hd_tv",
            Quality::FullHdTv => "full_hd_tv",
            Quality::HdWebDl => "hd_web_dl",
            Quality::FullHdWebDl => "full_hd_web_dl",
            Quality::HdBluRay => "hd_bluray",
            Quality::FullHdBluRay => "full_hd_bluray",
            Quality::Uhd4kWeb => "uhd_4k_web",
            Quality::Unknown => "unknown",
        }
    }

    /// Detect the quality of a release or file name.
    ///
    /// Only the last path component is inspected.
    pub fn from_name(name: &str, anime: bool) -> Quality {
        let name = base_name(name);
        label_quality(name).unwrap_or_else(|| scene_quality(name, anime))
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Quality::ALL
            .into_iter()
            .find(|q| q.key() == wanted || q.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown quality: {}", s))
    }
}

fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Labels this application writes itself, e.g. `Show.S01E02.720p.WEB-DL`.
static LABEL_PATTERNS: Lazy<Vec<(Quality, Regex)>> = Lazy::new(|| {
    LABELLED
        .into_iter()
        .map(|q| {
            let body = q
                .label()
                .split(' ')
                .map(crate::regex_atom::escape_literal)
                .collect::<Vec<_>>()
                .join(r"\W");
            let pattern = format!(r"(?i)\W{}\W", body);
            (q, Regex::new(&pattern).unwrap())
        })
        .collect()
});

fn label_quality(name: &str) -> Option<Quality> {
    LABEL_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(q, _)| *q)
}

macro_rules! marker {
    ($name:ident, $pattern:expr) => {
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new(concat!("(?i)", $pattern)).unwrap());
    };
}

marker!(
    SD_TV_SOURCE,
    r"(pdtv|hdtv|dsr|tvrip)([-]|.((aac|ac3|dd).?\d\.?\d.)*(xvid|x264|h.?264))"
);
marker!(HD_RESOLUTION, r"(720|1080|2160)[pi]");
marker!(FULL_HD_RESOLUTION, r"(1080|2160)[pi]");
marker!(HR_WS_PDTV, r"hr.ws.pdtv.(x264|h.?264)");
marker!(WEB, r"web.?(dl|rip|.[hx]26[45])");
marker!(SD_WEB_CODEC, r"xvid|x26[45]|.?26[45]");
marker!(DVD_RIP, r"(dvd.?rip|b[r|d]rip)(.ws)?(.(xvid|divx|x264|h.?264))?");
marker!(SD_CODEC, r"(xvid|divx|480p)");
marker!(P720, r"720p");
marker!(P1080, r"1080p");
marker!(P2160, r"2160p");
marker!(HDTV, r"hdtv");
marker!(H264, r"x264|h.?264");
marker!(X264, r"x264");
marker!(H_DOT_264, r"h.?264");
marker!(P720_OR_1080I, r"720p|1080i");
marker!(MPEG2, r"mpeg-?2");
marker!(RAW_1080_HDTV, r"1080[pi].hdtv");
marker!(ITUNES, r"itunes");
marker!(BLURAY, r"blu.?ray|hddvd|b[r|d]rip");
marker!(P1080_ANY, r"1080[pi]");
marker!(REMUX, r"remux");

marker!(ANIME_DVD, r"dvd|dvdrip");
marker!(ANIME_BLURAY, r"bluray|blu-ray|bd");
marker!(ANIME_SD, r"360p|480p|848x480|xvid");
marker!(ANIME_HD, r"720p|1280x720|960x720");
marker!(ANIME_FULL_HD, r"1080p|1920x1080");

/// Classify by scene markers. Unrecognized combinations are `Unknown`.
pub fn scene_quality(name: &str, anime: bool) -> Quality {
    let name = base_name(name);
    let has = |re: &Lazy<Regex>| re.is_match(name);

    if anime {
        let dvd = has(&ANIME_DVD);
        let bluray = has(&ANIME_BLURAY);
        let sd = has(&ANIME_SD);
        let hd = has(&ANIME_HD);
        let full_hd = has(&ANIME_FULL_HD);

        return if sd && !bluray && !dvd {
            Quality::SdTv
        } else if dvd {
            Quality::SdDvd
        } else if hd && !bluray && !full_hd {
            Quality::HdTv
        } else if full_hd && !bluray && !hd {
            Quality::FullHdTv
        } else if bluray && hd && !full_hd {
            Quality::HdBluRay
        } else if bluray && full_hd && !hd {
            Quality::FullHdBluRay
        } else {
            Quality::Unknown
        };
    }

    let hd_res = has(&HD_RESOLUTION);
    let hr_ws = has(&HR_WS_PDTV);

    if has(&SD_TV_SOURCE) && !hd_res && !hr_ws {
        Quality::SdTv
    } else if has(&WEB) && has(&SD_WEB_CODEC) && !hd_res {
        Quality::SdTv
    } else if has(&DVD_RIP) && !hd_res {
        Quality::SdDvd
    } else if has(&SD_CODEC) && !hd_res && !hr_ws {
        Quality::SdTv
    } else if (has(&P720) && has(&HDTV) && has(&H264)) || (hr_ws && !has(&FULL_HD_RESOLUTION)) {
        Quality::HdTv
    } else if (has(&P720_OR_1080I) && has(&HDTV) && has(&MPEG2))
        || (has(&RAW_1080_HDTV) && has(&H_DOT_264))
    {
        Quality::RawHdTv
    } else if has(&P1080) && has(&HDTV) && has(&X264) {
        Quality::FullHdTv
    } else if (has(&P720) && has(&WEB)) || (has(&P720) && has(&ITUNES) && has(&H264)) {
        Quality::HdWebDl
    } else if (has(&P1080) && has(&WEB)) || (has(&P1080) && has(&ITUNES) && has(&H264)) {
        Quality::FullHdWebDl
    } else if has(&P720) && has(&BLURAY) && has(&H264) {
        Quality::HdBluRay
    } else if (has(&P1080) && has(&BLURAY) && has(&H264))
        || (has(&P1080_ANY) && has(&REMUX) && !has(&HDTV))
    {
        Quality::FullHdBluRay
    } else if has(&P2160) && has(&WEB) {
        Quality::Uhd4kWeb
    } else {
        Quality::Unknown
    }
}
