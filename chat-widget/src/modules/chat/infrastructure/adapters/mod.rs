// Chat Infrastructure - Adapters
//
// - responders: 回复生成适配器（关键词匹配 / HTTP 后端）
// - renderers: 会话视图适配器（HTML / 终端）

pub mod renderers;
pub mod responders;
