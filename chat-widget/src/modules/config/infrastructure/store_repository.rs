// File-based Config Repository
//
// 基于 JSON 文件的配置仓储实现

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::RwLock;

use crate::modules::config::domain::WidgetConfig;
use crate::modules::config::ports::{ConfigError, ConfigRepository};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// 文件配置仓储
pub struct StoreConfigRepository {
    /// 配置文件路径
    config_path: PathBuf,
    /// 内存缓存
    cache: RwLock<Option<WidgetConfig>>,
}

impl StoreConfigRepository {
    /// 创建新的文件配置仓储
    ///
    /// # Arguments
    /// * `app_data_dir` - 应用数据目录
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self {
            config_path: app_data_dir.join(CONFIG_FILE_NAME),
            cache: RwLock::new(None),
        }
    }

    /// 从文件加载配置
    async fn load_from_file(&self) -> Result<Option<WidgetConfig>, ConfigError> {
        if !tokio::fs::try_exists(&self.config_path).await? {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.config_path).await?;
        let config: WidgetConfig = serde_json::from_str(&content)?;

        Ok(Some(config))
    }

    /// 保存配置到文件
    async fn save_to_file(&self, config: &WidgetConfig) -> Result<(), ConfigError> {
        // 确保目录存在
        if let Some(parent) = self.config_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(config)?;
        tokio::fs::write(&self.config_path, content).await?;

        Ok(())
    }
}

#[async_trait]
impl ConfigRepository for StoreConfigRepository {
    async fn load(&self) -> Result<WidgetConfig, ConfigError> {
        // 先检查缓存
        {
            let cache = self.cache.read().await;
            if let Some(ref config) = *cache {
                return Ok(config.clone());
            }
        }

        let config = self.load_from_file().await?.unwrap_or_default();

        // 更新缓存
        *self.cache.write().await = Some(config.clone());

        Ok(config)
    }

    async fn save(&self, config: &WidgetConfig) -> Result<(), ConfigError> {
        self.save_to_file(config).await?;
        *self.cache.write().await = Some(config.clone());
        Ok(())
    }

    async fn exists(&self) -> Result<bool, ConfigError> {
        Ok(tokio::fs::try_exists(&self.config_path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::config::domain::ResponderKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let repo = StoreConfigRepository::new(temp_dir.path().to_path_buf());

        let config = repo.load().await.unwrap();
        assert_eq!(config.responder.kind, ResponderKind::Canned);
        assert!(!repo.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = WidgetConfig::default();
        config.history.max_entries = 20;

        StoreConfigRepository::new(temp_dir.path().to_path_buf())
            .save(&config)
            .await
            .unwrap();

        let repo = StoreConfigRepository::new(temp_dir.path().to_path_buf());
        assert!(repo.exists().await.unwrap());
        assert_eq!(repo.load().await.unwrap().history.max_entries, 20);
    }

    #[tokio::test]
    async fn test_invalid_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "not json").unwrap();

        let repo = StoreConfigRepository::new(temp_dir.path().to_path_buf());
        assert!(matches!(
            repo.load().await,
            Err(ConfigError::SerializationError(_))
        ));
    }
}
