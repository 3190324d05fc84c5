// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    gemini::GeminiClient,
    relay::Relay,
    session::{GeminiSession, ModelSession},
};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    pub fn new(session: Arc<dyn ModelSession>) -> Self {
        Self {
            relay: Relay::new(session),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = GeminiClient::new(&config.api_key, &config.model, &config.api_base);
        Self::new(Arc::new(
            GeminiSession::new(client).with_max_turns(config.max_turns),
        ))
    }
}
