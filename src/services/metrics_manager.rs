use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Answered,
    Fallback,
    Failed,
    Rejected,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsData {
    pub answered: u64,
    pub fallback: u64,
    pub failed: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record(&self, outcome: Outcome) {
        let mut data = self.inner.write().await;
        let counter = match outcome {
            Outcome::Answered => &mut data.answered,
            Outcome::Fallback => &mut data.fallback,
            Outcome::Failed => &mut data.failed,
            Outcome::Rejected => &mut data.rejected,
        };
        *counter += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
