//! Storage-specific error type wrapping sqlx errors.

use servicecore_domain::error::ServiceCoreError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed, or a stored value could not be decoded.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for ServiceCoreError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
