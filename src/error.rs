use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Domain errors surfaced by the handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("username already exists")]
    DuplicateUsername,

    #[error("user not found")]
    NotFound,

    #[error("invalid credentials")]
    AuthFailure,

    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_)
            | ApiError::Validation(_)
            | ApiError::DuplicateUsername
            | ApiError::Upstream(_) => StatusCode::BAD_REQUEST,
            // Failed logins and unknown ids share the generic 500 with store
            // failures; clients depend on this mapping.
            ApiError::NotFound | ApiError::AuthFailure | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Decode(rejection.body_text())
    }
}
