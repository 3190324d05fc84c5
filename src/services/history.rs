// src/services/history.rs
use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    You,
    Bot,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::You => f.write_str("You"),
            Role::Bot => f.write_str("Bot"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub text: String,
}

/// On-screen transcript. Lives as long as the process.
#[derive(Clone, Debug, Default)]
pub struct ChatHistory {
    inner: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    // Append an entry and return the new length.
    pub async fn append(&self, role: Role, text: impl Into<String>) -> usize {
        let mut guard = self.inner.write().await;
        guard.push(HistoryEntry { role, text: text.into() });
        guard.len()
    }

    /// Record a question and its answer under one lock so pairs never interleave.
    pub async fn append_exchange(&self, question: &str, answer: &str) -> usize {
        let mut guard = self.inner.write().await;
        guard.push(HistoryEntry { role: Role::You, text: question.to_string() });
        guard.push(HistoryEntry { role: Role::Bot, text: answer.to_string() });
        guard.len()
    }

    /// Copy of the transcript in insertion order.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.inner.read().await.clone()
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
