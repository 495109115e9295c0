//! Business logic layer
//!
//! Services sit between the HTTP handlers and the database layer.

pub mod formatter;
pub mod search;

pub use formatter::format_response;
pub use search::SearchService;
