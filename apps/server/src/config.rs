//! Server configuration
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults (`Default` impls below)
//! 2. Optional `sift.{toml,yaml,json}` in the working directory
//! 3. `SIFT_` prefixed environment variables, `__` separating sections
//!    (e.g. `SIFT_DATABASE__POOL_MAX_SIZE=20`)
//! 4. Deployment conveniences: `DATABASE_URL`, `PORT`, and the discrete
//!    `DB_USER` / `DB_PASSWORD` / `DB_HOST` / `DB_PORT` / `DB_DATABASE` variables
//!
//! A `.env` file is loaded first if present.

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::db::search::query_builder::SearchMode;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty disables CORS headers; `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection URL. Takes precedence over the discrete fields.
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,

    /// Used by the integration tests instead of `url` when set.
    pub test_database_url: Option<String>,

    pub pool_min_size: u32,
    pub pool_max_size: u32,
    /// How long a request waits for a pooled connection before failing.
    pub pool_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub statement_timeout_seconds: u64,

    /// Apply embedded migrations at startup.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: None,
            port: None,
            user: None,
            password: None,
            name: None,
            test_database_url: None,
            pool_min_size: 0,
            pool_max_size: 10,
            pool_timeout_seconds: 5,
            idle_timeout_seconds: 30,
            statement_timeout_seconds: 30,
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    /// Build connection options from the URL or the discrete fields.
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        let options = match self.url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => PgConnectOptions::from_str(url)
                .map_err(|e| anyhow::anyhow!("Invalid database URL: {e}"))?,
            None => {
                let Some(host) = self.host.as_deref() else {
                    anyhow::bail!(
                        "No database configured: set DATABASE_URL or DB_HOST/DB_USER/DB_DATABASE"
                    );
                };
                let mut options = PgConnectOptions::new().host(host);
                if let Some(port) = self.port {
                    options = options.port(port);
                }
                if let Some(user) = self.user.as_deref() {
                    options = options.username(user);
                }
                if let Some(password) = self.password.as_deref() {
                    options = options.password(password);
                }
                if let Some(name) = self.name.as_deref() {
                    options = options.database(name);
                }
                options
            }
        };

        let statement_timeout = format!("{}s", self.statement_timeout_seconds);
        Ok(options
            .application_name("sift")
            .options([("statement_timeout", statement_timeout.as_str())]))
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_seconds)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// How the raw query becomes a text-search query. Fixed for the process lifetime.
    pub mode: SearchMode,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::Prefix,
            default_limit: 10,
            max_limit: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,

    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// daily | hourly | minutely | never
    pub file_rotation: String,

    pub opentelemetry_enabled: bool,
    pub otlp_endpoint: String,
    pub otlp_timeout_seconds: u64,
    pub trace_sample_ratio: f64,

    pub service_name: String,
    pub service_version: Option<String>,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "./logs".to_string(),
            file_prefix: "sift".to_string(),
            file_rotation: "daily".to_string(),
            opentelemetry_enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            otlp_timeout_seconds: 10,
            trace_sample_ratio: 1.0,
            service_name: "sift".to_string(),
            service_version: None,
            deployment_environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and `.env`.
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("sift").required(false))
            .add_source(
                config::Environment::with_prefix("SIFT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .set_override_option("database.url", env_var("DATABASE_URL"))?
            .set_override_option("database.host", env_var("DB_HOST"))?
            .set_override_option("database.user", env_var("DB_USER"))?
            .set_override_option("database.password", env_var("DB_PASSWORD"))?
            .set_override_option("database.name", env_var("DB_DATABASE"))?
            .set_override_option("database.port", env_int("DB_PORT")?)?
            .set_override_option("server.port", env_int("PORT")?)?;

        let config: Config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Reject settings that cannot work together.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let db = &self.database;
        if db.pool_max_size == 0 {
            return Err("database.pool_max_size must be at least 1".to_string());
        }
        if db.pool_min_size > db.pool_max_size {
            return Err(format!(
                "database.pool_min_size ({}) exceeds database.pool_max_size ({})",
                db.pool_min_size, db.pool_max_size
            ));
        }
        if db.pool_timeout_seconds == 0 {
            return Err("database.pool_timeout_seconds must be positive".to_string());
        }
        if db.url.as_deref().map_or(true, |u| u.trim().is_empty()) && db.host.is_none() {
            return Err(
                "no database configured: set DATABASE_URL or DB_HOST/DB_USER/DB_DATABASE"
                    .to_string(),
            );
        }

        let search = &self.search;
        if search.max_limit == 0 {
            return Err("search.max_limit must be at least 1".to_string());
        }
        if search.default_limit == 0 || search.default_limit > search.max_limit {
            return Err(format!(
                "search.default_limit ({}) must be between 1 and search.max_limit ({})",
                search.default_limit, search.max_limit
            ));
        }

        if !(0.0..=1.0).contains(&self.logging.trace_sample_ratio) {
            return Err("logging.trace_sample_ratio must be within [0, 1]".to_string());
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address {raw}: {e}"))
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_int(key: &str) -> anyhow::Result<Option<i64>> {
    env_var(key)
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .map_err(|e| anyhow::anyhow!("Invalid {key} value {v:?}: {e}"))
        })
        .transpose()
}
