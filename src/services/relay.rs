// src/services/relay.rs
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use super::{
    extract::FALLBACK_RESPONSE,
    gemini::GeminiError,
    history::ChatHistory,
    metrics_manager::{MetricsManager, Outcome},
    session::{Answer, ModelSession},
};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("No question provided")]
    EmptyQuestion,
    #[error(transparent)]
    Gemini(#[from] GeminiError),
}

/// Sends one question to the model session and hands back one answer.
#[derive(Clone)]
pub struct Relay {
    session: Arc<dyn ModelSession>,
    history: ChatHistory,
    metrics: MetricsManager,
    // Held across a turn and its transcript append, and across reset.
    turn: Arc<Mutex<()>>,
}

impl Relay {
    pub fn new(session: Arc<dyn ModelSession>) -> Self {
        Self {
            session,
            history: ChatHistory::new(),
            metrics: MetricsManager::new(),
            turn: Arc::new(Mutex::new(())),
        }
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn metrics(&self) -> &MetricsManager {
        &self.metrics
    }

    /// Answer text, or the fallback placeholder when the model produced none.
    pub async fn ask(&self, question: &str) -> Result<String, RelayError> {
        let question = question.trim();
        if question.is_empty() {
            self.metrics.record(Outcome::Rejected).await;
            return Err(RelayError::EmptyQuestion);
        }

        let _turn = self.turn.lock().await;
        let (answer, outcome) = match self.session.send_message(question).await {
            Ok(Answer::Text(text)) => (text, Outcome::Answered),
            Ok(Answer::Empty(reason)) => {
                tracing::warn!(%reason, "model returned no text");
                (FALLBACK_RESPONSE.to_string(), Outcome::Fallback)
            }
            Err(e) => {
                tracing::error!(error = %e, "model call failed");
                self.metrics.record(Outcome::Failed).await;
                return Err(e.into());
            }
        };

        self.metrics.record(outcome).await;
        self.history.append_exchange(question, &answer).await;
        Ok(answer)
    }

    /// Drop the transcript and the model-side conversation.
    pub async fn reset(&self) {
        let _turn = self.turn.lock().await;
        self.session.reset().await;
        self.history.clear().await;
    }
}
