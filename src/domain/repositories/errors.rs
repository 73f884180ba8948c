use thiserror::Error;

/// Errors returned by repository implementations
///
/// Storage failures are passed through untouched; the API layer decides
/// how they are reported.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid data: {0}")]
    Invalid(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
