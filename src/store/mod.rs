//! # Storage
//!
//! SQLite persistence for the bot, through a shared `sqlx` pool.
//!
//! - [`DeviceDirectory`]: device ownership and verification state
//! - [`UserDirectory`]: chat users
//! - [`ContentLog`]: contents accepted by the vendor
//!
//! "No such record" is reported as [`StoreError::NotFound`] so callers can
//! treat it as a normal branch.

pub mod content;
pub mod device;
pub mod user;

pub use content::ContentLog;
pub use device::DeviceDirectory;
pub use user::UserDirectory;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::error::StoreResult;

/// Open (creating if missing) the database at `database_url` and apply migrations.
pub async fn connect(database_url: &str) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    info!(%database_url, "Database connection established");

    migrate(&pool).await?;
    Ok(pool)
}

/// A private in-memory database, migrated.
///
/// Limited to one connection: every SQLite memory connection is its own database.
pub async fn connect_in_memory() -> StoreResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Current time as unix seconds.
pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

