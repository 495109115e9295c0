//! Database layer - connection pool, search SQL, and sample data

pub mod search;
pub mod seed;
pub mod store;
pub mod traits;

pub use search::{QueryBuilder, SearchMode, SearchRequest, SqlStatement};
pub use store::PostgresSearchStore;
pub use traits::SearchStore;
