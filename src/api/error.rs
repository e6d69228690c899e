use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error codes for client handling
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    UserNotFound,
    DatabaseError,
    UpstreamError,
    MalformedModelOutput,
    InternalError,
}

/// Standard API error response body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: ErrorCode,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code,
        }
    }
}

/// Wrapper for API results
pub type ApiResult<T> = Result<T, AppError>;

/// Application error that converts to HTTP responses
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: ApiError,
}

impl AppError {
    pub fn new(status: StatusCode, body: ApiError) -> Self {
        Self { status, body }
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ApiError::new(ErrorCode::NotFound, format!("{} not found", resource)),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::new(ErrorCode::ValidationError, message),
        )
    }

    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new(ErrorCode::UserNotFound, message),
        )
    }

    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new(ErrorCode::DatabaseError, err.to_string()),
        )
    }

    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            ApiError::new(ErrorCode::UpstreamError, err.to_string()),
        )
    }

    pub fn malformed_model(err: impl std::fmt::Display) -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            ApiError::new(ErrorCode::MalformedModelOutput, err.to_string()),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new(ErrorCode::InternalError, message),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<crate::db::DbError> for AppError {
    fn from(err: crate::db::DbError) -> Self {
        match &err {
            crate::db::DbError::UserNotFound(_) => Self::user_not_found(err.to_string()),
            crate::db::DbError::Validation(msg) => Self::validation(msg.clone()),
            _ => Self::database(err),
        }
    }
}

impl From<crate::ai::AiError> for AppError {
    fn from(err: crate::ai::AiError) -> Self {
        use crate::ai::AiError;
        match &err {
            AiError::Http(_) | AiError::Status { .. } => Self::upstream(err),
            AiError::MissingContent | AiError::MalformedOutput(_) | AiError::UnexpectedShape(_) => {
                Self::malformed_model(err)
            }
            AiError::Init(msg) => Self::internal(msg.clone()),
        }
    }
}
