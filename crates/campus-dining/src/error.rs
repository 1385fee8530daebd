//! Error types for the data access layer.

/// Errors that can occur during dining data operations.
#[derive(Debug, thiserror::Error)]
pub enum DiningError {
    /// A database operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The referenced restaurant does not exist.
    #[error("restaurant not found: {0}")]
    RestaurantNotFound(i64),
}
