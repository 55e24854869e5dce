// Chat Application Layer - 应用层
// 控制器负责消息往返；历史读写按 CQRS 拆分为命令和查询处理器

pub mod commands;
mod controller;
mod input_lock;
pub mod queries;

pub use commands::*;
pub use controller::*;
pub use input_lock::*;
pub use queries::*;

use async_trait::async_trait;
use thiserror::Error;

use super::ports::{RepositoryError, ResponderError};

/// 应用层错误类型
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Responder error: {0}")]
    ResponderError(#[from] ResponderError),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 命令处理器 trait
///
/// 遵循 CQRS 模式，命令处理器负责执行有副作用的操作
#[async_trait]
pub trait CommandHandler<C, R>: Send + Sync
where
    C: Send + Sync,
{
    /// 执行命令
    async fn handle(&self, command: C) -> Result<R, ApplicationError>;
}

/// 查询处理器 trait
///
/// 遵循 CQRS 模式，查询处理器负责只读操作
#[async_trait]
pub trait QueryHandler<Q, R>: Send + Sync
where
    Q: Send + Sync,
{
    /// 执行查询
    async fn handle(&self, query: Q) -> Result<R, ApplicationError>;
}
