use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::{AuthError, ResourceError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ReferenceNotFound(String),

    DuplicateName(String),

    ValidationError(String),

    RoleNameNotFound(String),

    DatabaseError(String),

    Unauthorized(String),

    Forbidden(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ReferenceNotFound(msg) => write!(f, "Reference not found: {}", msg),
            ApiError::DuplicateName(msg) => write!(f, "Duplicate name: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::RoleNameNotFound(msg) => write!(f, "Role name not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Machine-readable discriminant carried next to the human message
    /// in every error response.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::ReferenceNotFound(_) => "reference_not_found",
            ApiError::DuplicateName(_) => "duplicate_name",
            ApiError::ValidationError(_) => "validation",
            ApiError::RoleNameNotFound(_) => "role_name_not_found",
            ApiError::DatabaseError(_) => "database",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::InternalError(_) => "internal",
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::ReferenceNotFound(msg)
            | ApiError::DuplicateName(msg)
            | ApiError::ValidationError(msg)
            | ApiError::RoleNameNotFound(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error_with_kind(kind, error_message);
        (status, Json(body)).into_response()
    }
}

impl From<ResourceError> for ApiError {
    fn from(err: ResourceError) -> Self {
        let message = err.to_string();
        match err {
            ResourceError::NotFound { .. } => ApiError::NotFound(message),
            ResourceError::ReferenceNotFound { .. } => ApiError::ReferenceNotFound(message),
            ResourceError::DuplicateName { .. } => ApiError::DuplicateName(message),
            ResourceError::Validation(_) => ApiError::ValidationError(message),
            ResourceError::RoleNameNotFound(_) => ApiError::RoleNameNotFound(message),
            ResourceError::Database(_) => ApiError::DatabaseError(message),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken(_)
            | AuthError::PrincipalNotFound(_) => ApiError::Unauthorized(err.to_string()),
            AuthError::Database(msg) => ApiError::DatabaseError(msg),
            AuthError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
