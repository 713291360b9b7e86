//! Ranking and de-duplication of accepted candidates.

use std::collections::HashMap;

use super::types::{RankKey, ScoredCandidate, SearchHit};
use crate::parser::{Numbering, ParsedRelease};
use crate::quality::Quality;

/// Compute the sort key of a parsed hit. `preference` lists qualities from
/// most to least preferred; unlisted qualities rank last.
pub fn rank_key(hit: &SearchHit, parsed: &ParsedRelease, preference: &[Quality]) -> RankKey {
    RankKey {
        quality_rank: preference
            .iter()
            .position(|q| *q == parsed.quality)
            .unwrap_or(usize::MAX),
        version: parsed.version,
        seeders: hit.seeders.unwrap_or(0),
    }
}

/// Sort best first. Equal keys keep their original order.
pub fn sort_candidates(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| b.rank_key.cmp(&a.rank_key));
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupeKey {
    numbering: Numbering,
    quality: Quality,
    release_group: Option<String>,
}

impl DedupeKey {
    fn of(candidate: &ScoredCandidate) -> Option<Self> {
        let parsed = candidate.parsed.as_ref()?;
        Some(Self {
            numbering: parsed.numbering.clone(),
            quality: parsed.quality,
            release_group: parsed.release_group.as_ref().map(|g| g.to_lowercase()),
        })
    }
}

/// Collapse candidates for the same release (numbering, quality and group)
/// into the best-ranked one. Returns the survivors in first-seen order and
/// the candidates they replaced.
pub fn dedupe(candidates: Vec<ScoredCandidate>) -> (Vec<ScoredCandidate>, Vec<ScoredCandidate>) {
    let mut kept: Vec<ScoredCandidate> = Vec::with_capacity(candidates.len());
    let mut dropped = Vec::new();
    let mut index: HashMap<DedupeKey, usize> = HashMap::new();

    for candidate in candidates {
        let Some(key) = DedupeKey::of(&candidate) else {
            kept.push(candidate);
            continue;
        };
        match index.get(&key) {
            Some(&at) if candidate.rank_key > kept[at].rank_key => {
                let replaced = std::mem::replace(&mut kept[at], candidate);
                dropped.push(replaced);
            }
            Some(_) => dropped.push(candidate),
            None => {
                index.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }
    (kept, dropped)
}
