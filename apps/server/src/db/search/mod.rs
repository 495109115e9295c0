//! Full-text search: parameter validation and SQL construction

pub mod params;
pub mod query_builder;

pub use params::{LimitPolicy, SearchRequest, SortField, SortOrder};
pub use query_builder::{BindValue, QueryBuilder, SearchMode, SqlStatement};
