//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use std::sync::Once;

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Backend Metrics
    pub static ref BACKEND_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_backend_requests_total", "Total number of calls to the backend auth service"),
        &["endpoint", "outcome"]
    ).expect("metric can be created");
    pub static ref BACKEND_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "gatehouse_backend_request_duration_seconds",
            "Backend auth service call duration in seconds"
        ).buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        &["endpoint"]
    ).expect("metric can be created");

    // Form Metrics
    pub static ref VALIDATION_REJECTIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_validation_rejections_total", "Total number of form submissions rejected before reaching the backend"),
        &["form", "field"]
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_errors_total", "Total number of errors"),
        &["error_type"]
    ).expect("metric can be created");
}

static INIT: Once = Once::new();

/// Initialize metrics registry.
///
/// Safe to call more than once; registration only happens the first time.
pub fn init_metrics() {
    INIT.call_once(|| {
        REGISTRY
            .register(Box::new(BACKEND_REQUESTS_TOTAL.clone()))
            .expect("BACKEND_REQUESTS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(BACKEND_REQUEST_DURATION_SECONDS.clone()))
            .expect("BACKEND_REQUEST_DURATION_SECONDS can be registered");
        REGISTRY
            .register(Box::new(VALIDATION_REJECTIONS_TOTAL.clone()))
            .expect("VALIDATION_REJECTIONS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(ERRORS_TOTAL.clone()))
            .expect("ERRORS_TOTAL can be registered");

        tracing::info!("Metrics registry initialized");
    });
}
