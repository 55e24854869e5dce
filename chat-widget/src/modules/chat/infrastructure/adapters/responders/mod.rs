// Responder Adapters
// 回复生成端口的具体实现

mod canned;
mod http;

pub use canned::*;
pub use http::*;
