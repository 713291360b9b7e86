//! Seeder and leecher thresholds.

/// `true` when the peer counts meet the minimums.
///
/// Unknown counts pass only for providers that do not report peers.
pub fn peers_acceptable(
    seeders: Option<u32>,
    leechers: Option<u32>,
    min_seeders: u32,
    min_leechers: u32,
    seed_aware: bool,
) -> bool {
    count_acceptable(seeders, min_seeders, seed_aware)
        && count_acceptable(leechers, min_leechers, seed_aware)
}

fn count_acceptable(count: Option<u32>, minimum: u32, seed_aware: bool) -> bool {
    match count {
        Some(count) => count >= minimum,
        None => !seed_aware,
    }
}
