//! Storage seam between the search service and the database

use crate::{db::search::SqlStatement, models::SearchRow, Result};
use async_trait::async_trait;

/// Execution primitive for search statements.
///
/// The search service only ever talks to storage through this trait; the PostgreSQL
/// implementation is [`crate::db::PostgresSearchStore`].
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Execute a statement built by the query builder and return its rows in order.
    ///
    /// # Errors
    /// * `Storage(Timeout)` - no pooled connection became available in time
    /// * `Storage(DataFormat)` - the engine rejected a bound value (SQLSTATE class 22)
    /// * `Storage(Database)` - any other driver or server failure
    /// * `Internal` - a row did not decode into [`SearchRow`]
    async fn execute(&self, statement: &SqlStatement) -> Result<Vec<SearchRow>>;

    /// Run a trivial query. Never fails; `false` means the store is unusable.
    async fn check_liveness(&self) -> bool;
}
