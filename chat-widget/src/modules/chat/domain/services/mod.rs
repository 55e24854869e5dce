// Chat Domain - Services
// 领域服务处理不属于任何实体的业务逻辑

mod history_window;
mod keyword_matcher;
mod message_view;

pub use history_window::*;
pub use keyword_matcher::*;
pub use message_view::*;
