// Config Repository Port
//
// 配置存储仓储端口定义

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::config::domain::WidgetConfig;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {errors:?}")]
    ValidationError { errors: Vec<String> },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::StorageError(err.to_string())
    }
}

/// 配置仓储端口 - 定义配置持久化抽象
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// 加载配置，不存在时返回默认配置
    async fn load(&self) -> Result<WidgetConfig, ConfigError>;

    /// 保存配置
    async fn save(&self, config: &WidgetConfig) -> Result<(), ConfigError>;

    /// 检查配置是否存在
    async fn exists(&self) -> Result<bool, ConfigError>;
}
