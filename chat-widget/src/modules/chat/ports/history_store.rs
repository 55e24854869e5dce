use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::ChatMessage;

/// 仓储错误类型
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// 聊天历史存储端口
///
/// 以单个固定键保存完整的有序消息序列；条数上限由调用方负责
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// 加载历史（从旧到新），不存在时返回空
    async fn load(&self) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// 覆盖保存完整历史
    async fn save(&self, records: &[ChatMessage]) -> Result<(), RepositoryError>;
}
