// Chat Domain - Entities

mod message;

pub use message::*;
