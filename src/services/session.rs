// src/services/session.rs
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    extract::{EmptyResponse, collect_text},
    gemini::{Content, GeminiClient, GeminiError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Empty(EmptyResponse),
}

/// A conversation with a hosted model.
#[async_trait]
pub trait ModelSession: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<Answer, GeminiError>;

    /// Forget the conversation so far.
    async fn reset(&self);
}

/// Turns kept between requests unless configured otherwise.
pub const DEFAULT_MAX_TURNS: usize = 40;

/// Process-wide Gemini conversation. Turns are serialized by the lock.
#[derive(Debug)]
pub struct GeminiSession {
    client: GeminiClient,
    contents: Mutex<Vec<Content>>,
    max_turns: usize,
}

impl GeminiSession {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            contents: Mutex::new(Vec::new()),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Oldest user/model pairs are dropped once more than `max_turns` are held.
    /// Zero keeps everything.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub async fn turns(&self) -> usize {
        self.contents.lock().await.len()
    }
}

#[async_trait]
impl ModelSession for GeminiSession {
    async fn send_message(&self, text: &str) -> Result<Answer, GeminiError> {
        let mut contents = self.contents.lock().await;
        contents.push(Content::user(text));

        let chunks = match self.client.stream_generate(&contents).await {
            Ok(chunks) => chunks,
            Err(e) => {
                contents.pop();
                return Err(e);
            }
        };

        match collect_text(&chunks) {
            Ok(reply) => {
                contents.push(Content::model(reply.clone()));
                if self.max_turns > 0 && contents.len() > self.max_turns {
                    // Drop whole exchanges so the conversation still opens with a user turn.
                    let excess = contents.len() - self.max_turns;
                    let drop = (excess + 1) / 2 * 2;
                    let len = contents.len();
                    contents.drain(..drop.min(len));
                    tracing::debug!(dropped = drop, "trimmed model conversation");
                }
                Ok(Answer::Text(reply))
            }
            Err(reason) => {
                contents.pop();
                Ok(Answer::Empty(reason))
            }
        }
    }

    async fn reset(&self) {
        self.contents.lock().await.clear();
    }
}
