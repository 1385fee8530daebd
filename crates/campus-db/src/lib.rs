//! Database layer for the campus dining service.
//!
//! Provides SQLite connection pooling (via `r2d2`), pragma initialization,
//! and embedded SQL migrations. The `location`, `restaurant`, and `review`
//! tables are all created through versioned migrations managed here, and the
//! fixed set of campus locations is seeded by the same mechanism so it is
//! inserted exactly once per database.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
