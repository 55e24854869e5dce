// 文件持久化历史存储
//
// 模拟浏览器 localStorage：一个 JSON 对象文件，键为字符串，值为序列化后的字符串。
// 聊天历史保存在固定键下，值是消息记录的 JSON 数组

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

use crate::modules::chat::domain::ChatMessage;
use crate::modules::chat::ports::{HistoryStore, RepositoryError};

/// 存储文件名
pub const STORAGE_FILE_NAME: &str = "local_storage.json";
/// 默认存储键
pub const DEFAULT_STORAGE_KEY: &str = "chatHistory";

type StorageMap = BTreeMap<String, String>;

/// 文件历史存储
pub struct FileHistoryStore {
    storage: RwLock<StorageMap>,
    file_path: PathBuf,
    key: String,
}

impl FileHistoryStore {
    /// 创建文件历史存储
    ///
    /// # Arguments
    /// * `data_dir` - 应用数据目录路径
    /// * `key` - 历史所在的存储键
    pub async fn new(data_dir: PathBuf, key: impl Into<String>) -> Result<Self, RepositoryError> {
        let file_path = data_dir.join(STORAGE_FILE_NAME);

        // 确保目录存在
        fs::create_dir_all(&data_dir).await?;

        let storage = if fs::try_exists(&file_path).await? {
            let content = fs::read_to_string(&file_path).await?;
            parse_storage(&file_path, &content)
        } else {
            StorageMap::default()
        };

        Ok(Self {
            storage: RwLock::new(storage),
            file_path,
            key: key.into(),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 将数据持久化到文件（先写临时文件再替换）
    async fn persist(&self, storage: &StorageMap) -> Result<(), RepositoryError> {
        let content = serde_json::to_string_pretty(storage)?;
        let tmp_path = self.file_path.with_extension("json.tmp");

        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.file_path).await?;
        Ok(())
    }
}

/// 存储文件损坏时按空处理
fn parse_storage(path: &Path, content: &str) -> StorageMap {
    match serde_json::from_str(content) {
        Ok(storage) => storage,
        Err(e) => {
            tracing::warn!(
                "[FileHistoryStore] Ignoring unreadable storage file {:?}: {}",
                path,
                e
            );
            StorageMap::default()
        }
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> Result<Vec<ChatMessage>, RepositoryError> {
        let storage = self.storage.read().await;

        let Some(raw) = storage.get(&self.key) else {
            return Ok(Vec::new());
        };

        // 历史损坏时按空历史处理，不中断启动
        match serde_json::from_str::<Vec<ChatMessage>>(raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    "[FileHistoryStore] Discarding malformed history under '{}': {}",
                    self.key,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, records: &[ChatMessage]) -> Result<(), RepositoryError> {
        let value = serde_json::to_string(records)?;

        let mut storage = self.storage.write().await;
        storage.insert(self.key.clone(), value);
        self.persist(&storage).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::Sender;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(temp_dir.path().to_path_buf(), DEFAULT_STORAGE_KEY)
            .await
            .unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let records = vec![
            ChatMessage::from_parts("Quais são os preços?", Sender::User, 10),
            ChatMessage::from_parts("Nossos planos...", Sender::Bot, 11),
        ];

        {
            let store = FileHistoryStore::new(temp_dir.path().to_path_buf(), DEFAULT_STORAGE_KEY)
                .await
                .unwrap();
            store.save(&records).await.unwrap();
        }

        let reopened = FileHistoryStore::new(temp_dir.path().to_path_buf(), DEFAULT_STORAGE_KEY)
            .await
            .unwrap();
        assert_eq!(reopened.load().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_value_is_json_array_under_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(temp_dir.path().to_path_buf(), DEFAULT_STORAGE_KEY)
            .await
            .unwrap();
        store
            .save(&[ChatMessage::from_parts("oi", Sender::User, 1)])
            .await
            .unwrap();

        let content = std::fs::read_to_string(store.file_path()).unwrap();
        let storage: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        let value: serde_json::Value = serde_json::from_str(&storage["chatHistory"]).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{"text": "oi", "sender": "user", "timestamp": 1}])
        );
    }

    #[tokio::test]
    async fn test_malformed_history_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = StorageMap::new();
        storage.insert("chatHistory".to_string(), "[{not json".to_string());
        storage.insert("theme".to_string(), "dark".to_string());
        std::fs::write(
            temp_dir.path().join(STORAGE_FILE_NAME),
            serde_json::to_string(&storage).unwrap(),
        )
        .unwrap();

        let store = FileHistoryStore::new(temp_dir.path().to_path_buf(), DEFAULT_STORAGE_KEY)
            .await
            .unwrap();
        assert!(store.load().await.unwrap().is_empty());

        // 写入时保留其他键
        store.save(&[ChatMessage::new_user("oi")]).await.unwrap();
        let content = std::fs::read_to_string(store.file_path()).unwrap();
        let storage: StorageMap = serde_json::from_str(&content).unwrap();
        assert_eq!(storage["theme"], "dark");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(STORAGE_FILE_NAME), "{{{").unwrap();

        let store = FileHistoryStore::new(temp_dir.path().to_path_buf(), DEFAULT_STORAGE_KEY)
            .await
            .unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_separate_keys() {
        let temp_dir = TempDir::new().unwrap();
        let a = FileHistoryStore::new(temp_dir.path().to_path_buf(), "a")
            .await
            .unwrap();
        a.save(&[ChatMessage::new_user("só em a")]).await.unwrap();

        let b = FileHistoryStore::new(temp_dir.path().to_path_buf(), "b")
            .await
            .unwrap();
        assert!(b.load().await.unwrap().is_empty());
    }
}
