// Chat Domain - Value Objects
// 值对象是不可变的，通过值而非标识来比较

mod input_state;
mod key_event;

pub use input_state::*;
pub use key_event::*;
