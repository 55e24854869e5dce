// Chat Infrastructure Layer
// 基础设施层包含端口的具体实现

pub mod adapters;
pub mod repositories;

// 重导出常用类型
pub use adapters::renderers::{message_markup, sanitize_for_terminal, HtmlRenderer, TerminalRenderer};
pub use adapters::responders::{CannedResponder, HttpResponder, DEFAULT_LATENCY};
pub use repositories::{
    FileHistoryStore, InMemoryHistoryStore, DEFAULT_STORAGE_KEY, STORAGE_FILE_NAME,
};
