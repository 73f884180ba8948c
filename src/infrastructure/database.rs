// SQLite connection setup and embedded schema migrations

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::AppConfig;
use crate::domain::repositories::RepositoryResult;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a pool for the configured database and brings its schema up to date
pub async fn connect(config: &AppConfig) -> RepositoryResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Opens a private in-memory database with the schema applied
///
/// Every connection to `sqlite::memory:` sees its own database, so the
/// pool is pinned to a single connection that is never recycled.
pub async fn connect_in_memory() -> RepositoryResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Applies pending migrations
pub async fn migrate(pool: &SqlitePool) -> RepositoryResult<()> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database schema is up to date");
    Ok(())
}
