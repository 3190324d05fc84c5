// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    message::AskResponse,
    services::{extract::FALLBACK_RESPONSE, relay::RelayError},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("upstream model failure: {0}")]
    Upstream(String),
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::EmptyQuestion => {
                AppError::BadRequest(RelayError::EmptyQuestion.to_string())
            }
            RelayError::Gemini(e) => AppError::Upstream(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

// Every error body still carries a `response` key.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, response) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(detail) => {
                tracing::debug!(%detail, "mapping upstream failure to 502");
                (StatusCode::BAD_GATEWAY, FALLBACK_RESPONSE.to_string())
            }
        };
        (status, Json(AskResponse { response })).into_response()
    }
}
