//! Sift - full-text search over PostgreSQL
//!
//! One endpoint, `GET /api/search`, validates query-string parameters, builds
//! a parameterized `tsquery` statement, runs it against `searchable_content`,
//! and returns ranked or field-sorted results in a JSON envelope.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod startup;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
