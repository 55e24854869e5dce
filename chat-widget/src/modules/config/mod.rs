// Config Module
//
// 配置管理模块，采用六边形架构
//
// 层次结构:
// - domain: 领域层，包含配置实体和值对象
// - ports: 端口层，定义配置读写的抽象接口
// - infrastructure: 基础设施层，实现具体的配置存储适配器

pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型

// Domain
pub use domain::{
    GeneralConfig, HistoryConfig, QuickOption, ResponderConfig, ResponderKind, WidgetConfig,
};

// Ports
pub use ports::{ConfigError, ConfigRepository};

// Infrastructure
pub use infrastructure::{InMemoryConfigRepository, StoreConfigRepository, CONFIG_FILE_NAME};

use std::sync::Arc;

/// Config 模块容器
///
/// 管理模块内的依赖注入
pub struct ConfigModule {
    repository: Arc<dyn ConfigRepository>,
}

impl ConfigModule {
    /// 使用内存仓储创建（用于测试）
    pub fn new_in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryConfigRepository::new()))
    }

    /// 使用文件存储创建
    pub fn new_with_store(app_data_dir: std::path::PathBuf) -> Self {
        Self::with_repository(Arc::new(StoreConfigRepository::new(app_data_dir)))
    }

    /// 使用自定义仓储创建
    pub fn with_repository(repository: Arc<dyn ConfigRepository>) -> Self {
        Self { repository }
    }

    /// 获取全部配置（已校验）
    ///
    /// 首次运行时写入默认配置，方便手动编辑
    pub async fn get_all(&self) -> Result<WidgetConfig, ConfigError> {
        if !self.repository.exists().await? {
            self.repository.save(&WidgetConfig::default()).await?;
            tracing::info!("[ConfigModule] Wrote default configuration");
        }

        let config = self.repository.load().await?;
        config
            .validate()
            .map_err(|errors| ConfigError::ValidationError { errors })?;
        Ok(config)
    }
}
