//! Built-in naming patterns offered to users.

/// Patterns for regular season/episode shows.
pub const NAME_PRESETS: &[&str] = &[
    "%SN - %Sx%0E - %EN",
    "%S.N.S%0SE%0E.%E.N",
    "%Sx%0E - %EN",
    "S%0SE%0E - %EN",
    "Season %0S/%S.N.S%0SE%0E.%Q.N-%RG",
];

/// Patterns for anime shows.
pub const NAME_ANIME_PRESETS: &[&str] = NAME_PRESETS;

/// Patterns for air-by-date shows.
pub const NAME_ABD_PRESETS: &[&str] = &[
    "%SN - %A-D - %EN",
    "%S.N.%A.D.%E.N.%Q.N",
    "%Y/%0M/%S.N.%A.D.%E.N-%RG",
];

/// Patterns for sports shows.
pub const NAME_SPORTS_PRESETS: &[&str] = NAME_ABD_PRESETS;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{check_valid_abd_naming, check_valid_naming, check_valid_sports_naming};
    use crate::naming::{AnimeNumbering, MultiEpStyle};

    #[test]
    fn test_standard_presets_are_valid() {
        for preset in NAME_PRESETS {
            assert!(
                check_valid_naming(preset, MultiEpStyle::Repeat, AnimeNumbering::Standard),
                "{preset}"
            );
        }
    }

    #[test]
    fn test_date_presets_are_valid() {
        for preset in NAME_ABD_PRESETS {
            assert!(check_valid_abd_naming(preset), "{preset}");
        }
        for preset in NAME_SPORTS_PRESETS {
            assert!(check_valid_sports_naming(preset), "{preset}");
        }
    }
}
