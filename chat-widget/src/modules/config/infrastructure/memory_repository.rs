// In-Memory Config Repository
//
// 基于内存的配置仓储实现（用于测试和开发）

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::config::domain::WidgetConfig;
use crate::modules::config::ports::{ConfigError, ConfigRepository};

/// 内存配置仓储
pub struct InMemoryConfigRepository {
    config: RwLock<Option<WidgetConfig>>,
}

impl InMemoryConfigRepository {
    pub fn new() -> Self {
        Self {
            config: RwLock::new(None),
        }
    }

    pub fn with_config(config: WidgetConfig) -> Self {
        Self {
            config: RwLock::new(Some(config)),
        }
    }
}

impl Default for InMemoryConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigRepository for InMemoryConfigRepository {
    async fn load(&self) -> Result<WidgetConfig, ConfigError> {
        Ok(self.config.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, config: &WidgetConfig) -> Result<(), ConfigError> {
        *self.config.write().await = Some(config.clone());
        Ok(())
    }

    async fn exists(&self) -> Result<bool, ConfigError> {
        Ok(self.config.read().await.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_default_config() {
        let repo = InMemoryConfigRepository::new();
        let config = repo.load().await.unwrap();
        assert_eq!(config.history.max_entries, 50);
        assert!(!repo.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = InMemoryConfigRepository::new();
        let mut config = WidgetConfig::default();
        config.responder.latency_ms = 0;

        repo.save(&config).await.unwrap();
        assert!(repo.exists().await.unwrap());
        assert_eq!(repo.load().await.unwrap().responder.latency_ms, 0);
    }
}
