use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::{AskRequest, AskResponse},
    services::{history::HistoryEntry, metrics_manager::MetricsData},
    state::SharedState,
};

pub async fn get_response_handler(
    State(state): State<SharedState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AppError> {
    let Json(payload) = payload?;
    let question = payload.question.unwrap_or_default();

    let response = state.relay.ask(&question).await?;
    tracing::info!(question_len = question.len(), response_len = response.len(), "answered");

    Ok(Json(AskResponse { response }))
}

pub async fn get_history_handler(State(state): State<SharedState>) -> Json<Vec<HistoryEntry>> {
    Json(state.relay.history().entries().await)
}

pub async fn clear_history_handler(State(state): State<SharedState>) -> StatusCode {
    state.relay.reset().await;
    StatusCode::NO_CONTENT
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.relay.metrics().get_metrics().await)
}
