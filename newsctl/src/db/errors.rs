use sqlx::error::ErrorKind;
use thiserror::Error;

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// A referenced or targeted row does not exist
    #[error("Entity not found")]
    NotFound,

    /// Inserting would duplicate an existing row
    #[error("Entity already exists")]
    AlreadyExists,

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Backend-neutral classification of constraint failures.
///
/// Repositories decide per statement what a violation means, so the same
/// foreign-key failure can be "parent missing" in one place and a bug in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
}

impl ConstraintViolation {
    /// Classify a driver error, if it is a constraint violation we know about.
    pub fn classify(err: &sqlx::Error) -> Option<Self> {
        match err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => Some(Self::Unique),
                ErrorKind::ForeignKeyViolation => Some(Self::ForeignKey),
                _ => None,
            },
            _ => None,
        }
    }
}

impl DbError {
    /// Translate a statement failure through a per-statement violation table.
    ///
    /// Violations the table does not map, and every other driver error, become
    /// [`DbError::Other`] carrying `operation` as context.
    pub fn translate<F>(err: sqlx::Error, operation: &'static str, table: F) -> Self
    where
        F: Fn(ConstraintViolation) -> Option<DbError>,
    {
        if let Some(mapped) = ConstraintViolation::classify(&err).and_then(table) {
            return mapped;
        }
        DbError::Other(anyhow::Error::new(err).context(operation))
    }
}

/// Convert from sqlx::Error for statements that need no violation table
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            other => DbError::Other(anyhow::Error::new(other)),
        }
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
