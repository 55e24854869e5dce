use async_trait::async_trait;
use thiserror::Error;

/// 回复生成错误类型
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Responder not available: {0}")]
    NotAvailable(String),
}

/// 回复生成端口
///
/// 输入一条用户消息，异步返回一条回复或失败
#[async_trait]
pub trait ResponderPort: Send + Sync {
    /// 实现标识（用于日志）
    fn responder_id(&self) -> &str;

    /// 生成回复
    async fn respond(&self, message: &str) -> Result<String, ResponderError>;
}
