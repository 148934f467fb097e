//! Profile Error Types
//!
//! Crate-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ProfileResult<T> = Result<T, ProfileError>;

#[derive(Debug, Error)]
pub enum ProfileError {
    /// No profile with the requested identifier (or not visible to the caller)
    #[error("Profile not found")]
    ProfileNotFound,

    /// A profile with this identifier already exists
    #[error("Profile already exists")]
    ProfileExists,

    /// An account with this identifier already exists
    #[error("Account already exists")]
    AccountExists,

    /// Email rejected by the storage constraint
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Request payload failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Route requires an authenticated caller
    #[error("Authentication required")]
    Unauthenticated,

    /// Bearer token could not be verified
    #[error("Invalid access token")]
    InvalidToken,

    /// Caller is authenticated but the access policy denies the operation
    #[error("Operation not permitted")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProfileError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProfileError::ProfileNotFound => StatusCode::NOT_FOUND,
            ProfileError::ProfileExists | ProfileError::AccountExists => StatusCode::CONFLICT,
            ProfileError::InvalidEmail(_) | ProfileError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            ProfileError::Unauthenticated | ProfileError::InvalidToken => StatusCode::UNAUTHORIZED,
            ProfileError::Forbidden => StatusCode::FORBIDDEN,
            ProfileError::Database(_) | ProfileError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::ProfileNotFound => ErrorKind::NotFound,
            ProfileError::ProfileExists | ProfileError::AccountExists => ErrorKind::Conflict,
            ProfileError::InvalidEmail(_) | ProfileError::InvalidInput(_) => {
                ErrorKind::BadRequest
            }
            ProfileError::Unauthenticated | ProfileError::InvalidToken => ErrorKind::Unauthorized,
            ProfileError::Forbidden => ErrorKind::Forbidden,
            ProfileError::Database(_) | ProfileError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            ProfileError::InvalidToken => err.with_action("Sign in again to obtain a new token"),
            ProfileError::InvalidEmail(_) => {
                err.with_action("Enter an address such as jane@example.com")
            }
            _ => err,
        }
    }

    fn log(&self) {
        match self {
            ProfileError::Database(e) => {
                tracing::error!(error = %e, "Profile database error");
            }
            ProfileError::Internal(msg) => {
                tracing::error!(message = %msg, "Profile internal error");
            }
            ProfileError::InvalidToken => {
                tracing::warn!("Rejected request with invalid access token");
            }
            ProfileError::Forbidden => {
                tracing::warn!("Access policy denied profile operation");
            }
            _ => {
                tracing::debug!(error = %self, "Profile error");
            }
        }
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ProfileError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => ProfileError::InvalidEmail(err.message().to_string()),
            _ => ProfileError::Internal(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for ProfileError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!(error = %err, "Token verification failed");
        ProfileError::InvalidToken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_kind_agree() {
        let errors = [
            ProfileError::ProfileNotFound,
            ProfileError::ProfileExists,
            ProfileError::AccountExists,
            ProfileError::InvalidEmail("x".into()),
            ProfileError::InvalidInput("x".into()),
            ProfileError::Unauthenticated,
            ProfileError::InvalidToken,
            ProfileError::Forbidden,
            ProfileError::Internal("boom".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code());
        }
    }

    #[test]
    fn test_app_error_bad_request_maps_to_invalid_email() {
        let err: ProfileError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, ProfileError::InvalidEmail(msg) if msg == "Invalid email format"));
    }
}
