//! Migration from the old discrete naming options to a pattern.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const EPISODE_TEMPLATES: [&str; 4] = ["%Sx%0E", "s%0Se%0E", "S%0SE%0E", "%0Sx%0E"];
const SEPARATORS: [&str; 2] = [" - ", " "];

/// Naming options as stored by old configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyNamingSettings {
    pub use_periods: bool,
    /// Index into `1x02`, `s01e02`, `S01E02`, `01x02`.
    pub ep_type: usize,
    /// Index into ` - ` and a single space.
    pub sep_type: usize,
    pub use_quality: bool,
    pub use_show_name: bool,
    pub use_ep_name: bool,
    /// Build an air-by-date pattern instead of a season/episode one.
    pub air_by_date: bool,
    /// printf-style season folder format such as `Season %02d`.
    pub season_folders_format: Option<String>,
}

impl Default for LegacyNamingSettings {
    fn default() -> Self {
        Self {
            use_periods: false,
            ep_type: 0,
            sep_type: 0,
            use_quality: false,
            use_show_name: true,
            use_ep_name: true,
            air_by_date: false,
            season_folders_format: None,
        }
    }
}

/// Build the pattern equivalent to `settings`.
pub fn derive_legacy_pattern(settings: &LegacyNamingSettings) -> String {
    let (show_name, ep_name, quality, air_date) = if settings.use_periods {
        ("%S.N", "%E.N", "%Q.N", "%A.D")
    } else {
        ("%SN", "%EN", "%QN", "%A-D")
    };
    let sep = SEPARATORS.get(settings.sep_type).unwrap_or(&SEPARATORS[0]);
    let ep_string = if settings.air_by_date {
        air_date
    } else {
        EPISODE_TEMPLATES
            .get(settings.ep_type)
            .unwrap_or(&EPISODE_TEMPLATES[0])
    };

    let mut pattern = String::new();
    if settings.use_show_name {
        pattern.push_str(show_name);
        pattern.push_str(sep);
    }
    pattern.push_str(ep_string);
    if settings.use_ep_name {
        pattern.push_str(sep);
        pattern.push_str(ep_name);
    }
    if settings.use_quality {
        pattern.push_str(sep);
        pattern.push_str(quality);
    }
    if settings.use_periods {
        pattern = WHITESPACE.replace_all(&pattern, ".").into_owned();
    }

    if let Some(format) = settings.season_folders_format.as_deref().filter(|f| !f.is_empty()) {
        match season_folder_pattern(format) {
            Some(folder) => {
                info!(from = %format, to = %folder, "Converted season folder format");
                pattern = format!("{folder}/{pattern}");
            }
            None => warn!(format = %format, "Cannot convert season folder format"),
        }
    }
    pattern
}

/// `Season %02d` becomes `Season %0S`, `Season %d` becomes `Season %S`.
fn season_folder_pattern(format: &str) -> Option<String> {
    if format.contains("%02d") {
        Some(format.replacen("%02d", "%0S", 1))
    } else if format.contains("%d") {
        Some(format.replacen("%d", "%S", 1))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = LegacyNamingSettings::default();
        assert_eq!(derive_legacy_pattern(&settings), "%SN - %Sx%0E - %EN");
    }

    #[test]
    fn test_periods_and_quality() {
        let settings = LegacyNamingSettings {
            use_periods: true,
            ep_type: 2,
            use_quality: true,
            ..Default::default()
        };
        assert_eq!(derive_legacy_pattern(&settings), "%S.N.-.S%0SE%0E.-.%E.N.-.%Q.N");

        let settings = LegacyNamingSettings {
            use_periods: true,
            ep_type: 1,
            sep_type: 1,
            ..Default::default()
        };
        assert_eq!(derive_legacy_pattern(&settings), "%S.N.s%0Se%0E.%E.N");
    }

    #[test]
    fn test_air_by_date() {
        let settings = LegacyNamingSettings {
            air_by_date: true,
            use_ep_name: false,
            ..Default::default()
        };
        assert_eq!(derive_legacy_pattern(&settings), "%SN - %A-D");
    }

    #[test]
    fn test_minimal() {
        let settings = LegacyNamingSettings {
            use_show_name: false,
            use_ep_name: false,
            ep_type: 3,
            ..Default::default()
        };
        assert_eq!(derive_legacy_pattern(&settings), "%0Sx%0E");
    }

    #[test]
    fn test_season_folders() {
        let mut settings = LegacyNamingSettings {
            season_folders_format: Some("Season %02d".to_string()),
            ..Default::default()
        };
        assert_eq!(derive_legacy_pattern(&settings), "Season %0S/%SN - %Sx%0E - %EN");

        settings.season_folders_format = Some("S%d".to_string());
        assert_eq!(derive_legacy_pattern(&settings), "S%S/%SN - %Sx%0E - %EN");

        settings.season_folders_format = Some("Seasons".to_string());
        assert_eq!(derive_legacy_pattern(&settings), "%SN - %Sx%0E - %EN");
    }

    #[test]
    fn test_out_of_range_indices() {
        let settings = LegacyNamingSettings {
            ep_type: 9,
            sep_type: 7,
            ..Default::default()
        };
        assert_eq!(derive_legacy_pattern(&settings), "%SN - %Sx%0E - %EN");
    }
}
