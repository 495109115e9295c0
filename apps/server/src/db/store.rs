//! PostgreSQL search store
//!
//! Owns the process-wide connection pool. Nothing else in the crate acquires
//! connections directly.

use crate::{
    config::DatabaseConfig,
    db::search::{BindValue, SqlStatement},
    db::traits::SearchStore,
    models::SearchRow,
    Error, Result,
};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Instant;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct PostgresSearchStore {
    pool: PgPool,
}

impl PostgresSearchStore {
    /// Build the pool without opening any connection yet.
    ///
    /// Connections are established on first use; call [`SearchStore::check_liveness`]
    /// to find out whether the database is actually reachable.
    pub fn connect_lazy(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let options = config.connect_options()?;
        let pool = PgPoolOptions::new()
            .min_connections(config.pool_min_size)
            .max_connections(config.pool_max_size)
            .acquire_timeout(config.pool_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect_lazy_with(options);

        tracing::debug!(
            pool_max_size = config.pool_max_size,
            pool_timeout_seconds = config.pool_timeout_seconds,
            "Database pool configured"
        );

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        MIGRATOR.run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Close every pooled connection. Further queries fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }

    /// Get connection pool size (for metrics)
    pub fn pool_size(&self) -> u32 {
        self.pool.size()
    }

    /// Get number of idle connections (for metrics)
    pub fn num_idle(&self) -> usize {
        self.pool.num_idle()
    }
}

#[async_trait]
impl SearchStore for PostgresSearchStore {
    async fn execute(&self, statement: &SqlStatement) -> Result<Vec<SearchRow>> {
        let start = Instant::now();

        let result = async {
            // The connection goes back to the pool when `conn` drops, on every path.
            let mut conn = self.pool.acquire().await?;

            let mut query = sqlx::query_as::<_, SearchRow>(&statement.sql);
            for value in &statement.binds {
                query = match value {
                    BindValue::Text(v) => query.bind(v.as_str()),
                    BindValue::BigInt(v) => query.bind(*v),
                };
            }

            query.fetch_all(&mut *conn).await
        }
        .await;

        crate::metrics::DB_QUERY_DURATION_SECONDS
            .with_label_values(&["search"])
            .observe(start.elapsed().as_secs_f64());

        result.map_err(|e| {
            let err = Error::from(e);
            let error_type = match &err {
                Error::Storage(storage) => storage.kind(),
                _ => "decode",
            };
            crate::metrics::DB_QUERY_ERRORS_TOTAL
                .with_label_values(&["search", error_type])
                .inc();
            err
        })
    }

    async fn check_liveness(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database liveness check failed");
                false
            }
        }
    }
}
