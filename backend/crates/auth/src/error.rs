//! Auth Error Types
//!
//! Auth-specific error variants that render through the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::bearer::BearerError;
use platform::password::{PasswordHashError, PasswordPolicyError};
use platform::token::TokenError;
use thiserror::Error;

use crate::domain::value_object::vehicle_type::VehicleType;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request failed schema or enum validation
    #[error("{0}")]
    InvalidInput(String),

    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password (the two cases share one message)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired bearer token
    #[error("Invalid or expired token")]
    Unauthorized,

    #[error("Access forbidden: required roles [{}], but user has {actual}", format_roles(.required))]
    Forbidden {
        required: Vec<VehicleType>,
        actual: VehicleType,
    },

    /// Backend failure or timeout in the user store
    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_roles(roles: &[VehicleType]) -> String {
    roles
        .iter()
        .map(VehicleType::code)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput(_)
            | AuthError::DuplicateEmail
            | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_)
            | AuthError::DuplicateEmail
            | AuthError::InvalidCredentials => ErrorKind::BadRequest,
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden { .. } => ErrorKind::Forbidden,
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs; clients get a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::StoreUnavailable(_) => {
                AppError::new(self.kind(), "Database error").with_action("Please try again later")
            }
            AuthError::Internal(_) => AppError::new(self.kind(), "Internal server error"),
            AuthError::Unauthorized => {
                AppError::new(self.kind(), self.to_string()).with_action("Please log in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "User store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Forbidden { actual, .. } => {
                tracing::warn!(vehicle_type = %actual, "Role not permitted for route");
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

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::InvalidInput(err.message().to_string())
        }
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::InvalidInput(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Password worker failed: {err}"))
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken => AuthError::Unauthorized,
            TokenError::Encoding(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<BearerError> for AuthError {
    fn from(_: BearerError) -> Self {
        AuthError::Unauthorized
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AuthError::DuplicateEmail
            }
            _ => AuthError::StoreUnavailable(err.to_string()),
        }
    }
}
