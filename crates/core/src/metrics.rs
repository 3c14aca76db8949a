//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Stream cache lookups
//! - FileList requests (search, descriptor download)
//! - Descriptor resolution
//! - Streams returned per request

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts};

/// Cache lookups by result.
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("filelist_cache_lookups_total", "Stream cache lookups"),
        &["result"], // "hit", "miss", "expired"
    )
    .unwrap()
});

/// Requests made to FileList.
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("filelist_upstream_requests_total", "Requests sent to FileList"),
        &["operation", "result"], // operation: "search", "download"
    )
    .unwrap()
});

/// Descriptor-to-magnet resolutions by result.
pub static DESCRIPTOR_RESOLUTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "filelist_descriptor_resolutions_total",
            "Torrent descriptor resolutions",
        ),
        &["result"], // "ok", "failed"
    )
    .unwrap()
});

/// Streams returned per resolution.
pub static STREAMS_RETURNED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "filelist_streams_returned",
            "Number of streams returned per request",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0]),
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(UPSTREAM_REQUESTS.clone()),
        Box::new(DESCRIPTOR_RESOLUTIONS.clone()),
        Box::new(STREAMS_RETURNED.clone()),
    ]
}
