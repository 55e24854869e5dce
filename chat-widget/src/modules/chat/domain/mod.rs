// Chat Domain Layer
// 领域层包含实体、值对象、领域服务和领域事件

pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;

// 重导出常用类型
pub use entities::{ChatMessage, Sender};
pub use events::*;
pub use services::{
    escape_html, CannedReply, DisplayOffset, HistoryWindow, KeywordMatcher, MessageView,
    TimeLabelFormatter, DEFAULT_HISTORY_LIMIT, DEFAULT_REPLY, DEFAULT_TIME_FORMAT,
    UNKNOWN_TIME_LABEL,
};
pub use value_objects::{InputState, Key, KeyEvent};
