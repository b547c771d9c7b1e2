use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// The connection pool could not be built or hand out a connection.
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// A blocking database task panicked or was cancelled.
    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The connection pool was closed during shutdown.
    #[error("Connection pool is closed")]
    PoolClosed,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
