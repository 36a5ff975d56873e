use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::{auth::AuthError, companies::repo::RepoError, response::ApiResponse};

/// Every failure a handler can produce. Converted into a `{code, message}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not a valid token")]
    Authentication,

    #[error("{0}")]
    NotFound(String),

    #[error("Name not unique")]
    Uniqueness,

    #[error("query failed: {0}")]
    Query(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_)
            | ApiError::Validation(_)
            | ApiError::Authentication
            | ApiError::Uniqueness => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Config(_) | ApiError::Query(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ApiResponse::new(status.as_u16(), message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::EmptyToken | AuthError::InvalidToken | AuthError::Authentication => {
                ApiError::Authentication
            }
            AuthError::Config => ApiError::Config(e.to_string()),
            AuthError::Signing(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound => ApiError::NotFound("Company not found".into()),
            RepoError::Query(e) => ApiError::Query(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Decode(format!("Unable to decode the request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Decode(format!("Invalid company id: {}", rejection.body_text()))
    }
}
