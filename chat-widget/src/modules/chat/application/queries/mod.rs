// Chat Queries - 查询定义和处理器

mod load_history;

pub use load_history::*;
