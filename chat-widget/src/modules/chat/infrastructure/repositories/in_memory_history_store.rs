use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::chat::domain::ChatMessage;
use crate::modules::chat::ports::{HistoryStore, RepositoryError};

/// 内存历史存储
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<ChatMessage>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<ChatMessage>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> Result<Vec<ChatMessage>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, records: &[ChatMessage]) -> Result<(), RepositoryError> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }
}
