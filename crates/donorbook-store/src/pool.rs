//! Bounded pool of [`Database`] connections on top of `deadpool`.
//!
//! rusqlite is synchronous, so [`Pool::run`] checks a connection out
//! asynchronously and executes the closure on tokio's blocking thread pool.
//! When every connection is in use, callers wait for one to be returned.

use std::path::{Path, PathBuf};

use deadpool::managed::{self, Metrics, PoolError, RecycleResult};
use tracing::info;

use crate::database::Database;
use crate::error::{Result, StoreError};

/// Opens migrated [`Database`] connections to one file.
pub struct DatabaseManager {
    path: PathBuf,
}

impl managed::Manager for DatabaseManager {
    type Type = Database;
    type Error = StoreError;

    async fn create(&self) -> Result<Database> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Database::open_at(&path)).await?
    }

    async fn recycle(&self, _db: &mut Database, _metrics: &Metrics) -> RecycleResult<StoreError> {
        Ok(())
    }
}

pub struct Pool {
    inner: managed::Pool<DatabaseManager>,
}

impl Pool {
    /// Build a pool of up to `size` connections (at least one) to the
    /// database at `path`.
    ///
    /// The file is opened and migrated once here so that startup fails fast
    /// on a bad path; pooled connections are opened lazily.
    pub fn open(path: &Path, size: usize) -> Result<Self> {
        let size = size.max(1);
        Database::open_at(path)?;

        let inner = managed::Pool::builder(DatabaseManager {
            path: path.to_path_buf(),
        })
        .max_size(size)
        .build()
        .map_err(|e| StoreError::Pool(e.to_string()))?;

        info!(path = %path.display(), size, "database pool opened");
        Ok(Self { inner })
    }

    /// Run `f` against a pooled connection on the blocking thread pool.
    pub async fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.inner.get().await.map_err(|e| match e {
            PoolError::Closed => StoreError::PoolClosed,
            PoolError::Backend(e) => e,
            other => StoreError::Pool(other.to_string()),
        })?;

        tokio::task::spawn_blocking(move || f(&*db)).await?
    }

    /// Close the pool: idle connections are dropped now, checked-out ones
    /// when they are returned, and later [`run`](Self::run) calls fail with
    /// [`StoreError::PoolClosed`].
    pub fn close(&self) {
        self.inner.close();
        info!("database pool closed");
    }

    pub fn size(&self) -> usize {
        self.inner.status().max_size
    }
}
