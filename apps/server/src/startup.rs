//! Startup checks run before the listener is bound

use crate::state::AppState;

/// Fail fast when the database is unreachable.
///
/// Applies migrations afterwards when `database.run_migrations` is set.
pub async fn verify_database(state: &AppState) -> anyhow::Result<()> {
    if !state.search_service.check_liveness().await {
        anyhow::bail!("Database is not reachable; refusing to start");
    }
    tracing::info!("Database connection verified");

    if state.config.database.run_migrations {
        state.store.migrate().await?;
    }

    Ok(())
}
