// Chat Ports Layer
// 端口定义了模块与外部世界的接口

mod history_store;
mod renderer_port;
mod responder_port;

pub use history_store::*;
pub use renderer_port::*;
pub use responder_port::*;
