use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::Sender;
use super::value_objects::InputState;

/// 领域事件基础 trait
pub trait DomainEvent: Clone + Send + Sync {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> DateTime<Utc>;
}

/// 消息已渲染
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRenderedEvent {
    pub sender: Sender,
    pub text: String,
    pub message_timestamp: i64,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for MessageRenderedEvent {
    fn event_type(&self) -> &'static str {
        "message.rendered"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 一轮对话完成并写入历史
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeCompletedEvent {
    pub user_text: String,
    pub bot_text: String,
    pub history_len: usize,
    /// 因超出上限被淘汰的条数
    pub evicted: usize,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for ExchangeCompletedEvent {
    fn event_type(&self) -> &'static str {
        "exchange.completed"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 回复生成失败，已替换为兜底消息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponderFailedEvent {
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for ResponderFailedEvent {
    fn event_type(&self) -> &'static str {
        "responder.failed"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 输入区状态变化
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputStateChangedEvent {
    pub state: InputState,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for InputStateChangedEvent {
    fn event_type(&self) -> &'static str {
        "input.state_changed"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 启动时历史已回放
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRestoredEvent {
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for HistoryRestoredEvent {
    fn event_type(&self) -> &'static str {
        "history.restored"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 聊天领域事件枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChatDomainEvent {
    MessageRendered(MessageRenderedEvent),
    ExchangeCompleted(ExchangeCompletedEvent),
    ResponderFailed(ResponderFailedEvent),
    InputStateChanged(InputStateChangedEvent),
    HistoryRestored(HistoryRestoredEvent),
}

impl ChatDomainEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ChatDomainEvent::MessageRendered(e) => e.event_type(),
            ChatDomainEvent::ExchangeCompleted(e) => e.event_type(),
            ChatDomainEvent::ResponderFailed(e) => e.event_type(),
            ChatDomainEvent::InputStateChanged(e) => e.event_type(),
            ChatDomainEvent::HistoryRestored(e) => e.event_type(),
        }
    }

    pub fn message_rendered(sender: Sender, text: &str, message_timestamp: i64) -> Self {
        ChatDomainEvent::MessageRendered(MessageRenderedEvent {
            sender,
            text: text.to_string(),
            message_timestamp,
            timestamp: Utc::now(),
        })
    }

    pub fn input_state_changed(state: InputState) -> Self {
        ChatDomainEvent::InputStateChanged(InputStateChangedEvent {
            state,
            timestamp: Utc::now(),
        })
    }
}
