// Chat Infrastructure - Repositories
//
// 历史存储实现：
// - InMemoryHistoryStore: 内存存储，用于开发和测试
// - FileHistoryStore: 类 localStorage 的 JSON 键值文件，跨重启保留

mod file_history_store;
mod in_memory_history_store;

pub use file_history_store::*;
pub use in_memory_history_store::*;
