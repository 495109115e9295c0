use anyhow::Context as _;
use sift::Config;
use std::sync::Arc;
use tokio::sync::OnceCell;

static SHARED: OnceCell<Arc<SharedTestResources>> = OnceCell::const_new();

pub struct SharedTestResources {
    pub base_config: Config,
    /// `None` when no test database is configured; database tests are skipped.
    pub database_url: Option<String>,
}

pub async fn shared() -> anyhow::Result<Arc<SharedTestResources>> {
    SHARED
        .get_or_try_init(|| async {
            init_tracing();

            let mut config = Config::load().context("load Config for tests")?;
            let database_url = config
                .database
                .test_database_url
                .clone()
                .filter(|url| !url.trim().is_empty());

            // Never point tests at whatever DATABASE_URL the shell exports.
            config.database.url = database_url.clone();
            config.database.run_migrations = false;
            config.database.pool_min_size = 0;
            config.database.pool_max_size = 2;
            config.database.pool_timeout_seconds = 30;
            config.server.cors_origins.clear();

            Ok(Arc::new(SharedTestResources {
                base_config: config,
                database_url,
            }))
        })
        .await
        .cloned()
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "sift=info,sqlx=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

/// Whether database-backed tests must run rather than skip. Set in CI, or
/// locally via `SIFT_REQUIRE_TEST_DATABASE=1`.
pub fn database_required() -> bool {
    is_truthy(std::env::var("SIFT_REQUIRE_TEST_DATABASE").ok().as_deref())
        || is_truthy(std::env::var("CI").ok().as_deref())
}

fn is_truthy(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !(v == "0" || v.eq_ignore_ascii_case("false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_flags() {
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("true")));
        assert!(is_truthy(Some("yes")));
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(Some("FALSE")));
    }
}
