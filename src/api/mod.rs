//! Page layer
//!
//! HTTP handlers for:
//! - Home page
//! - Metrics (Prometheus)
//!
//! Login/signup/logout live in `crate::auth`.

mod home;
pub mod metrics;

pub use home::home_router;
pub use metrics::metrics_router;
