use crate::db::errors::DbError;
use thiserror::Error;

/// Outcomes of news workflows that callers are expected to handle
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("news not found")]
    NewsNotFound,

    #[error("categories already exists")]
    CategoriesAlreadyExists,

    /// Anything else; carries the storage error chain for logging
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Storage errors without a domain meaning at the call site
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Other(inner) => ServiceError::Other(inner),
            other => ServiceError::Other(anyhow::Error::new(other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
