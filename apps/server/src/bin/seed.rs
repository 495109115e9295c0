//! Load the sample catalogue into `searchable_content`
//!
//! Usage:
//!   cargo run --bin sift-seed -- [--database-url <url>] [--skip-migrations] [--truncate]
//!
//! Without `--database-url` the server configuration is used (`DATABASE_URL`,
//! `DB_*`, or `SIFT_DATABASE__*`).

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use sift::{
    config::Config,
    db::{seed, PostgresSearchStore},
    logging,
};

#[derive(Parser, Debug)]
#[clap(name = "sift-seed")]
#[clap(about = "Insert the 130 sample records used by the search demo")]
struct Args {
    /// Database connection URL (overrides configuration)
    #[clap(short, long)]
    database_url: Option<String>,

    /// Do not apply schema migrations first
    #[clap(long)]
    skip_migrations: bool,

    /// Delete existing rows before inserting
    #[clap(long)]
    truncate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_simple_logging();
    let args = Args::parse();

    let mut database = Config::load()
        .context("Failed to load configuration")?
        .database;
    if let Some(url) = args.database_url {
        database.url = Some(url);
    }

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(database.pool_timeout())
        .connect_with(database.connect_options()?)
        .await
        .context("Failed to connect to database")?;
    let store = PostgresSearchStore::from_pool(pool);

    if !args.skip_migrations {
        store.migrate().await.context("Failed to apply migrations")?;
    }

    if args.truncate {
        sqlx::query("TRUNCATE searchable_content RESTART IDENTITY")
            .execute(store.pool())
            .await
            .context("Failed to truncate searchable_content")?;
        info!("Existing rows removed");
    }

    let records = seed::sample_records();
    let start = std::time::Instant::now();
    let ids = seed::insert_records(store.pool(), &records)
        .await
        .context("Failed to insert sample records")?;

    info!(
        inserted = ids.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Sample records inserted"
    );

    store.close().await;
    Ok(())
}
