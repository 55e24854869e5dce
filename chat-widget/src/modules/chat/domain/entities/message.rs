use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 消息发送方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// 用户消息
    User,
    /// 机器人回复
    Bot,
}

impl Sender {
    /// 渲染时使用的 CSS 类名
    pub fn css_class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    /// 气泡图标
    pub fn icon_class(&self) -> &'static str {
        match self {
            Sender::User => "fa-user",
            Sender::Bot => "fa-robot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// 聊天消息实体
///
/// 创建后不可变；持久化时序列化为 `{text, sender, timestamp}` 记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// 消息文本（显示前转义）
    text: String,
    /// 发送方
    sender: Sender,
    /// 创建时间（毫秒时间戳）
    timestamp: i64,
}

impl ChatMessage {
    /// 创建用户消息
    pub fn new_user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// 创建机器人消息
    pub fn new_bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// 从已有记录恢复（用于从存储加载）
    pub fn from_parts(text: impl Into<String>, sender: Sender, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp,
        }
    }

    // Getters
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}
