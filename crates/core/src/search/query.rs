//! Search strings for providers.

use crate::naming::{sanitize_scene_name, EpisodeContext};

/// Scene-style spellings of the show names, duplicates removed.
pub fn scene_show_names<S: AsRef<str>>(show_names: &[S]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(show_names.len());
    for name in show_names {
        let scene = sanitize_scene_name(name.as_ref());
        if !scene.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(&scene)) {
            names.push(scene);
        }
    }
    names
}

/// The numbering part of an episode search: `S02E03`, `2011.03.09` or `003`.
pub fn episode_numbering(ep: &EpisodeContext) -> String {
    if ep.air_by_date || ep.sports {
        ep.air_date.format("%Y.%m.%d").to_string()
    } else if ep.is_anime {
        let absolute = if ep.scene_absolute_number == 0 {
            ep.absolute_number
        } else {
            ep.scene_absolute_number
        };
        format!("{:03}", absolute)
    } else {
        format!("S{:02}E{:02}", ep.scene_season, ep.scene_episode)
    }
}

/// One search string per show name, e.g. `Show.Name.S02E03`.
pub fn episode_search_strings<S: AsRef<str>>(show_names: &[S], ep: &EpisodeContext) -> Vec<String> {
    let numbering = episode_numbering(ep);
    scene_show_names(show_names)
        .into_iter()
        .map(|name| format!("{name}.{numbering}"))
        .collect()
}

/// One season-pack search string per show name, e.g. `Show.Name.S02`.
pub fn season_search_strings<S: AsRef<str>>(show_names: &[S], season: u32) -> Vec<String> {
    scene_show_names(show_names)
        .into_iter()
        .map(|name| format!("{name}.S{:02}", season))
        .collect()
}

/// Percent-encode search strings for use in URLs, with `spacer` between
/// words.
pub fn url_encode(queries: &[String], spacer: &str) -> Vec<String> {
    queries
        .iter()
        .map(|q| urlencoding::encode(&q.replace('.', spacer)).into_owned())
        .collect()
}
