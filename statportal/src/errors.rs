use crate::db::errors::DbError;
use crate::types::{Action, Resource};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// No Authorization header, or not of the form `Bearer <token>`
    #[error("Missing bearer token")]
    MissingToken,

    /// Token malformed, signed with the wrong secret, or expired
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token verified but no matching user row exists.
    /// Surfaced to the client identically to [`Error::InvalidToken`] so the
    /// response does not reveal whether the account still exists.
    #[error("Token subject not found")]
    UserNotFound,

    /// Token verified but the account has been deactivated.
    /// Surfaced to the client identically to [`Error::InvalidToken`].
    #[error("Token subject is deactivated")]
    UserInactive,

    /// Login failed: unknown email, inactive account, or wrong password.
    /// All legs produce this one variant so the responses are byte-identical.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Authenticated, but the role does not permit the action or category
    #[error("Not permitted to {action} {resource}")]
    Forbidden { action: Action, resource: String },

    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found (access already confirmed permitted)
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Convenience constructor for category/action denials.
    pub fn forbidden(action: Action, resource: Resource) -> Self {
        Error::Forbidden {
            action,
            resource: resource.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingToken
            | Error::InvalidToken
            | Error::UserNotFound
            | Error::UserInactive
            | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details.
    ///
    /// The post-verification failures (`InvalidToken`, `UserNotFound`,
    /// `UserInactive`) intentionally share one message: a caller must not be
    /// able to distinguish a revoked account from a stale token.
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingToken => "Authentication required".to_string(),
            Error::InvalidToken | Error::UserNotFound | Error::UserInactive => "Invalid or expired token".to_string(),
            Error::InvalidCredentials => "Invalid email or password".to_string(),
            Error::Forbidden { action, resource } => {
                format!("Not permitted to {action} {resource}")
            }
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, id } => {
                format!("{resource} with ID {id} not found")
            }
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { constraint, table, .. } => {
                    // Friendlier messages for the constraints users actually hit
                    match (table.as_deref(), constraint.as_deref()) {
                        (Some("users"), Some(c)) if c.contains("email") => "An account with this email address already exists".to_string(),
                        (Some("articles"), Some(c)) if c.contains("slug") => "An article with this slug already exists".to_string(),
                        (Some("indicator_data"), Some("indicator_data_indicator_year_unique")) => {
                            "A data point for this indicator and year already exists".to_string()
                        }
                        _ => "Resource already exists".to_string(),
                    }
                }
                DbError::ForeignKeyViolation { .. } => "Invalid reference to related resource".to_string(),
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::MissingToken
            | Error::InvalidToken
            | Error::UserNotFound
            | Error::UserInactive
            | Error::InvalidCredentials
            | Error::Forbidden { .. } => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();

        match &self {
            // The login contract returns a structured body; both failure legs
            // (unknown email, wrong password) collapse into this single arm so
            // the responses stay byte-identical.
            Error::InvalidCredentials => {
                let body = json!({
                    "success": false,
                    "error": self.user_message(),
                });
                (status, axum::response::Json(body)).into_response()
            }
            _ => (status, self.user_message()).into_response(),
        }
    }
}

/// Convert from String errors (e.g., from external functions)
impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Internal { operation: msg }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
