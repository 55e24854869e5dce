// Chat Commands - 命令定义和处理器

mod record_exchange;

pub use record_exchange::*;
