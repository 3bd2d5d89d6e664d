//! Schema Migrator
//!
//! Applies pending SQLite migrations from a directory. Creates the database
//! file if it does not exist yet.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use sqlx::migrate::{Migrate, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "migrator", about = "Apply SSO schema migrations")]
struct Args {
    /// Path to the SQLite database file
    #[arg(long)]
    storage_path: PathBuf,

    /// Directory holding `<version>_<name>.sql` files
    #[arg(long)]
    migrations_path: PathBuf,

    /// Tolerate applied migrations absent from `migrations_path`
    /// (needed when layering a fixture set over the schema set)
    #[arg(long)]
    ignore_missing: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "migrator=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let pool = open(&args.storage_path).await?;

    let mut migrator = Migrator::new(args.migrations_path.as_path())
        .await
        .with_context(|| {
            format!(
                "failed to read migrations from {}",
                args.migrations_path.display()
            )
        })?;
    migrator.set_ignore_missing(args.ignore_missing);

    let pending = count_pending(&pool, &migrator).await?;
    if pending == 0 {
        tracing::info!("No new migrations to apply");
        return Ok(());
    }

    migrator
        .run(&pool)
        .await
        .context("failed to apply migrations")?;

    tracing::info!(applied = pending, "Migrations applied successfully");

    Ok(())
}

async fn open(path: &Path) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open storage at {}", path.display()))
}

async fn count_pending(pool: &SqlitePool, migrator: &Migrator) -> anyhow::Result<usize> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;

    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(migrator
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.contains(&m.version))
        .count())
}
