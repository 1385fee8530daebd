//! Shared SQLite pool for the dining tables.
//!
//! Every request handler checks out its own connection, so the settings that
//! make concurrent access safe (WAL journal, busy timeout, enforced foreign
//! keys for the restaurant/review cascade) are applied to each connection as
//! the pool opens it.

use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

/// Pool sizing and lock-wait settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// How long a writer waits for the database lock before failing, in
    /// milliseconds.
    pub busy_timeout_ms: u64,

    /// Upper bound on concurrently open connections.
    pub pool_max_size: u32,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            pool_max_size: 8,
        }
    }
}

/// Pool of SQLite connections handed to request handlers.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Errors raised while opening the pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// r2d2 could not open the initial connections.
    #[error("failed to create database connection pool: {0}")]
    PoolInit(#[from] r2d2::Error),
}

/// Applies per-connection settings. An in-memory database reports the
/// `memory` journal mode and is accepted as is.
fn init_connection(conn: &mut Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    let journal_mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    if !journal_mode.eq_ignore_ascii_case("wal") && journal_mode != "memory" {
        return Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
            Some(format!("journal mode stuck at '{}', WAL required", journal_mode)),
        ));
    }

    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(busy_timeout)
}

/// Opens the campus database at `db_path` and wraps it in a pool.
///
/// `:memory:` is accepted for tests, but each pooled connection then gets a
/// private database of its own.
///
/// # Errors
///
/// Returns `PoolError::PoolInit` when the file cannot be opened or a
/// connection rejects its settings.
pub fn create_pool(db_path: &str, settings: DbRuntimeSettings) -> Result<DbPool, PoolError> {
    let busy_timeout = Duration::from_millis(settings.busy_timeout_ms);
    let manager = SqliteConnectionManager::file(db_path)
        .with_flags(
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX,
        )
        .with_init(move |conn| init_connection(conn, busy_timeout));

    let pool = Pool::builder()
        .max_size(settings.pool_max_size)
        .build(manager)?;

    tracing::debug!(
        path = db_path,
        max_size = settings.pool_max_size,
        "database pool created"
    );

    Ok(pool)
}
