//! Request handlers for API endpoints

pub mod metrics;
pub mod search;

pub use metrics::metrics_handler;
pub use search::search;
