use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::{ChatMessage, HistoryWindow};
use crate::modules::chat::ports::HistoryStore;

/// 加载历史查询
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadHistoryQuery;

/// 加载历史响应
#[derive(Debug, Clone)]
pub struct LoadHistoryResponse {
    /// 从旧到新
    pub messages: Vec<ChatMessage>,
}

/// 加载历史查询处理器
pub struct LoadHistoryHandler {
    history_store: Arc<dyn HistoryStore>,
    window: HistoryWindow,
}

impl LoadHistoryHandler {
    pub fn new(history_store: Arc<dyn HistoryStore>, window: HistoryWindow) -> Self {
        Self {
            history_store,
            window,
        }
    }
}

#[async_trait]
impl QueryHandler<LoadHistoryQuery, LoadHistoryResponse> for LoadHistoryHandler {
    async fn handle(&self, _query: LoadHistoryQuery) -> Result<LoadHistoryResponse, ApplicationError> {
        let messages = self.history_store.load().await?;

        // 外部写入的超长历史只回放最新部分
        Ok(LoadHistoryResponse {
            messages: self.window.truncate(messages),
        })
    }
}
