use thiserror::Error;

/// Errors surfaced by repository implementations.
///
/// Driver failures (constraint violations included) pass through
/// unmodified; there is no custom taxonomy beyond what callers branch on.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} not found: id={id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("unsupported sort field: {0}")]
    UnsupportedSortField(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
