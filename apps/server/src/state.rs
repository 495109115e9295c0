//! Shared application state handed to every handler

use crate::{
    config::Config,
    db::{search::LimitPolicy, PostgresSearchStore, QueryBuilder},
    services::SearchService,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<PostgresSearchStore>,
    pub search_service: Arc<SearchService>,
}

impl AppState {
    /// Build the pool (lazily) and the search service on top of it.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Arc::new(PostgresSearchStore::connect_lazy(&config.database)?);
        Ok(Self::with_store(config, store))
    }

    /// Assemble state around an existing store.
    pub fn with_store(config: Config, store: Arc<PostgresSearchStore>) -> Self {
        let limits = LimitPolicy {
            default: config.search.default_limit,
            max: config.search.max_limit,
        };
        let search_service = Arc::new(SearchService::new(
            store.clone(),
            QueryBuilder::new(config.search.mode),
            limits,
        ));

        tracing::debug!(
            mode = ?config.search.mode,
            default_limit = limits.default,
            max_limit = limits.max,
            "Search service ready"
        );

        Self {
            config: Arc::new(config),
            store,
            search_service,
        }
    }

    /// Close the pool. In-flight queries finish first.
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
