//! Route tables merged into the main router

pub mod metrics;
pub mod search;
