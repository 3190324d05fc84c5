// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{clear_history_handler, get_history_handler, get_metrics_handler, get_response_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(public_dir: impl AsRef<Path>) -> Router<SharedState> {
    Router::new()
        .route("/get_response", post(get_response_handler))
        .route(
            "/history",
            get(get_history_handler).delete(clear_history_handler),
        )
        .route("/metrics", get(get_metrics_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}
