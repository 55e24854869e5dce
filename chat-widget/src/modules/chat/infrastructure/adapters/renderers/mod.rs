// Renderer Adapters
// 渲染端口的具体实现

mod html;
mod terminal;

pub use html::*;
pub use terminal::*;
