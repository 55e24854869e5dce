// Modules Layer - 业务模块
//
// 按照六边形架构组织的业务模块：
// - chat: 聊天模块，处理消息收发、渲染与历史
// - config: 配置模块，处理组件设置

pub mod chat;
pub mod config;

pub use chat::ChatModule;
pub use config::ConfigModule;
