//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password; callers cannot tell which
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Correct password, but the account or its role is disabled
    #[error("Account is inactive")]
    AccountInactive,

    #[error("Missing session token")]
    MissingToken,

    #[error("Session not found or expired")]
    UnknownOrExpiredToken,

    #[error("Path not permitted")]
    PathNotPermitted,

    /// Initial reference cache load failed; fatal at startup
    #[error("Failed to load reference cache: {0}")]
    CacheLoadFailure(String),

    #[error("Backing store unavailable: {0}")]
    BackingStoreUnavailable(#[from] sqlx::Error),

    /// A freshly minted token collided with a live one
    #[error("Session token already registered")]
    DuplicateToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::UnknownOrExpiredToken => ErrorKind::Unauthorized,
            AuthError::AccountInactive | AuthError::PathNotPermitted => ErrorKind::Forbidden,
            AuthError::CacheLoadFailure(_) | AuthError::BackingStoreUnavailable(_) => {
                ErrorKind::ServiceUnavailable
            }
            AuthError::DuplicateToken | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message safe to show a caller; server-side detail stays in logs
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::ServiceUnavailable => "Service temporarily unavailable".to_string(),
            ErrorKind::InternalServerError => "Internal error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::BackingStoreUnavailable(e) => {
                tracing::error!(error = %e, "Auth backing store error");
            }
            AuthError::CacheLoadFailure(msg) | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::DuplicateToken => {
                tracing::error!("Session token collision");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountInactive => {
                tracing::warn!("Login attempt on inactive account");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failures_share_message() {
        assert_eq!(
            AuthError::InvalidCredentials.public_message(),
            "Invalid username or password"
        );
        assert_ne!(
            AuthError::AccountInactive.public_message(),
            AuthError::InvalidCredentials.public_message()
        );
    }

    #[test]
    fn test_store_detail_not_exposed() {
        let err = AuthError::BackingStoreUnavailable(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(err.public_message(), "Service temporarily unavailable");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::MissingToken.kind().status_code(), 401);
        assert_eq!(AuthError::UnknownOrExpiredToken.kind().status_code(), 401);
        assert_eq!(AuthError::PathNotPermitted.kind().status_code(), 403);
        assert_eq!(AuthError::DuplicateToken.kind().status_code(), 500);
    }
}
