//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits. Each request
//! borrows a connection for the lifetime of its queries and hands it back
//! on drop, whether the request succeeded or not.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a connection waits for SQLite's write lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Create a SQLite connection pool.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (`sqlite://rolodex.db`, `sqlite::memory:`)
///
/// # Errors
///
/// Returns an error if the URL is invalid or the database cannot be opened.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("sqlite://rolodex.db").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a SQLite connection pool with custom options.
///
/// The database file is created if missing, foreign keys are enforced on
/// every connection and writers wait up to `BUSY_TIMEOUT` for the lock.
/// File databases use WAL so readers don't block the writer. In-memory
/// databases are pinned to a single, never recycled connection; each SQLite
/// connection would otherwise see its own empty database.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let (options, pool_options) = if is_in_memory(database_url) {
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        (options, pool_options)
    } else {
        let options = options.journal_mode(SqliteJournalMode::Wal);
        let pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));
        (options, pool_options)
    };

    tracing::debug!(url = %database_url, "Opening database pool");
    pool_options.connect_with(options).await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
