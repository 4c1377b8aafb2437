use crate::services::errors::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Bearer token missing or malformed
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Bearer token present but did not verify (bad signature, expired, wrong algorithm)
    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    /// Invalid request data
    #[error("{message}")]
    BadRequest { message: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Outcome of a news workflow
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Error::InvalidToken { .. } => StatusCode::FORBIDDEN,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Service(service_err) => match service_err {
                ServiceError::NewsNotFound => StatusCode::NOT_FOUND,
                ServiceError::CategoriesAlreadyExists => StatusCode::BAD_REQUEST,
                ServiceError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message.clone().unwrap_or_else(|| "Authentication required".to_string()),
            Error::InvalidToken { .. } => "Invalid or expired token".to_string(),
            Error::BadRequest { message } => message.clone(),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Service(service_err) => match service_err {
                ServiceError::NewsNotFound | ServiceError::CategoriesAlreadyExists => service_err.to_string(),
                ServiceError::Other(_) => "Internal server error".to_string(),
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Service(ServiceError::Other(_)) | Error::Internal { .. } => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Service(_) => {
                tracing::warn!("Domain error: {}", self);
            }
            Error::Unauthenticated { .. } | Error::InvalidToken { .. } => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::BadRequest { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        (self.status_code(), self.user_message()).into_response()
    }
}

/// Type alias for handler results
pub type Result<T> = std::result::Result<T, Error>;
