use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{ChatMessage, HistoryWindow, Sender};
use crate::modules::chat::ports::HistoryStore;

/// 记录一轮对话命令
#[derive(Debug, Clone)]
pub struct RecordExchangeCommand {
    /// 用户消息
    pub user_message: ChatMessage,
    /// 机器人回复
    pub bot_message: ChatMessage,
}

impl RecordExchangeCommand {
    pub fn new(user_message: ChatMessage, bot_message: ChatMessage) -> Self {
        Self {
            user_message,
            bot_message,
        }
    }
}

/// 记录对话响应
#[derive(Debug, Clone)]
pub struct RecordExchangeResponse {
    /// 保存后的历史条数
    pub history_len: usize,
    /// 本次因超出上限被淘汰的条数
    pub evicted: usize,
}

/// 记录对话命令处理器
///
/// 读取现有历史，追加用户/机器人消息对，截断到上限后整体写回
pub struct RecordExchangeHandler {
    history_store: Arc<dyn HistoryStore>,
    window: HistoryWindow,
}

impl RecordExchangeHandler {
    pub fn new(history_store: Arc<dyn HistoryStore>, window: HistoryWindow) -> Self {
        Self {
            history_store,
            window,
        }
    }
}

#[async_trait]
impl CommandHandler<RecordExchangeCommand, RecordExchangeResponse> for RecordExchangeHandler {
    async fn handle(
        &self,
        command: RecordExchangeCommand,
    ) -> Result<RecordExchangeResponse, ApplicationError> {
        if command.user_message.sender() != Sender::User
            || command.bot_message.sender() != Sender::Bot
        {
            return Err(ApplicationError::ValidationError(
                "Exchange must be a user message followed by a bot message".to_string(),
            ));
        }

        let records = self.history_store.load().await?;
        let before = records.len() + 2;

        let records = self
            .window
            .append(records, [command.user_message, command.bot_message]);
        self.history_store.save(&records).await?;

        tracing::debug!(
            "[RecordExchange] History now holds {} messages",
            records.len()
        );

        Ok(RecordExchangeResponse {
            history_len: records.len(),
            evicted: before - records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::infrastructure::InMemoryHistoryStore;

    fn exchange(i: usize) -> RecordExchangeCommand {
        RecordExchangeCommand::new(
            ChatMessage::from_parts(format!("pergunta {}", i), Sender::User, i as i64 * 2),
            ChatMessage::from_parts(format!("resposta {}", i), Sender::Bot, i as i64 * 2 + 1),
        )
    }

    #[tokio::test]
    async fn test_record_exchange() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let handler = RecordExchangeHandler::new(store.clone(), HistoryWindow::default());

        let response = handler.handle(exchange(0)).await.unwrap();
        assert_eq!(response.history_len, 2);
        assert_eq!(response.evicted, 0);

        let saved = store.load().await.unwrap();
        assert_eq!(saved[0].sender(), Sender::User);
        assert_eq!(saved[1].sender(), Sender::Bot);
    }

    #[tokio::test]
    async fn test_cap_keeps_latest_fifty() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let handler = RecordExchangeHandler::new(store.clone(), HistoryWindow::default());

        // 30 轮 = 60 条消息
        for i in 0..30 {
            handler.handle(exchange(i)).await.unwrap();
        }

        let saved = store.load().await.unwrap();
        assert_eq!(saved.len(), 50);
        assert_eq!(saved.first().unwrap().text(), "pergunta 5");
        assert_eq!(saved.last().unwrap().text(), "resposta 29");
        assert!(saved.windows(2).all(|w| w[0].timestamp() < w[1].timestamp()));
    }

    #[tokio::test]
    async fn test_rejects_swapped_pair() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let handler = RecordExchangeHandler::new(store.clone(), HistoryWindow::default());

        let command = RecordExchangeCommand::new(
            ChatMessage::new_bot("oi"),
            ChatMessage::new_user("olá"),
        );
        let result = handler.handle(command).await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert!(store.load().await.unwrap().is_empty());
    }
}
