//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Release name parsing
//! - Naming pattern validation
//! - Search result filtering
//! - Search providers

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Parser Metrics
// =============================================================================

/// Release names parsed by outcome.
pub static RELEASES_PARSED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("sickle_releases_parsed_total", "Total release names parsed"),
        &["outcome"], // "ok", "empty", "no_numbering", "invalid_date"
    )
    .unwrap()
});

// =============================================================================
// Naming Metrics
// =============================================================================

/// Naming pattern validations by outcome.
pub static NAMING_VALIDATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "sickle_naming_validations_total",
            "Total naming pattern validations",
        ),
        &["outcome"], // "valid", "invalid"
    )
    .unwrap()
});

// =============================================================================
// Filter Metrics
// =============================================================================

/// Candidates accepted by the result filter.
pub static CANDIDATES_ACCEPTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "sickle_candidates_accepted_total",
            "Total search candidates accepted",
        ),
        &["quality"],
    )
    .unwrap()
});

/// Candidates rejected by the result filter.
pub static CANDIDATES_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "sickle_candidates_rejected_total",
            "Total search candidates rejected",
        ),
        &["reason"],
    )
    .unwrap()
});

// =============================================================================
// Search Provider Metrics
// =============================================================================

/// Provider search duration in seconds.
pub static PROVIDER_SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "sickle_provider_search_duration_seconds",
            "Duration of provider searches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["provider", "result"], // result: "success", "error"
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(RELEASES_PARSED.clone()),
        Box::new(NAMING_VALIDATIONS.clone()),
        Box::new(CANDIDATES_ACCEPTED.clone()),
        Box::new(CANDIDATES_REJECTED.clone()),
        Box::new(PROVIDER_SEARCH_DURATION.clone()),
    ]
}
