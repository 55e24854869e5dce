use super::super::entities::ChatMessage;

/// 持久化历史的默认上限
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// 历史窗口
///
/// 保留最近的 `limit` 条消息，超出时从最旧的一端淘汰
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    limit: usize,
}

impl HistoryWindow {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 追加一轮对话并截断
    pub fn append(
        &self,
        mut records: Vec<ChatMessage>,
        exchange: impl IntoIterator<Item = ChatMessage>,
    ) -> Vec<ChatMessage> {
        records.extend(exchange);
        self.truncate(records)
    }

    /// 只保留最新的 `limit` 条，保持从旧到新的顺序
    pub fn truncate(&self, mut records: Vec<ChatMessage>) -> Vec<ChatMessage> {
        if records.len() > self.limit {
            let overflow = records.len() - self.limit;
            records.drain(..overflow);
        }
        records
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
