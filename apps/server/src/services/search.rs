//! Search service - full-text search over `searchable_content`
//!
//! Orchestrates one search request:
//! - Validating query-string parameters
//! - Building the parameterized statement
//! - Executing it through the [`SearchStore`]
//! - Formatting the response envelope

use crate::{
    db::search::{LimitPolicy, QueryBuilder, SearchRequest},
    db::traits::SearchStore,
    models::SearchResponse,
    services::formatter::format_response,
    Result,
};
use std::sync::Arc;

/// Search service coordinates validation, SQL construction, and execution
pub struct SearchService {
    store: Arc<dyn SearchStore>,
    query_builder: QueryBuilder,
    limits: LimitPolicy,
}

impl SearchService {
    pub fn new(store: Arc<dyn SearchStore>, query_builder: QueryBuilder, limits: LimitPolicy) -> Self {
        Self {
            store,
            query_builder,
            limits,
        }
    }

    /// Search from raw query-string items.
    ///
    /// GET /api/search?q=...&category=...&limit=...&sortBy=...&sortOrder=...
    pub async fn search(&self, query_items: &[(String, String)]) -> Result<SearchResponse> {
        let request = SearchRequest::from_items(query_items, &self.limits)?;
        self.search_request(&request).await
    }

    /// Search with already validated parameters.
    pub async fn search_request(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let statement = self.query_builder.build_sql(request);

        tracing::debug!(
            sql = %statement.sql,
            bind_count = statement.binds.len(),
            sort_by = request.sort_by.as_str(),
            "Executing search"
        );

        let rows = self.store.execute(&statement).await?;
        let response = format_response(request, rows)?;

        crate::metrics::SEARCH_RESULTS
            .with_label_values(&[request.sort_by.as_str()])
            .observe(response.metadata.returned as f64);

        Ok(response)
    }

    /// Liveness of the underlying store. Used by the startup check.
    pub async fn check_liveness(&self) -> bool {
        self.store.check_liveness().await
    }
}
