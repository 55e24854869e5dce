use serde::{Deserialize, Serialize};
use std::fmt;

/// 输入区状态
///
/// 值对象：Idle 时输入框可用；Busy 时输入被禁用、显示加载指示器，
/// 同一时刻最多一个请求在途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputState {
    #[default]
    Idle,
    Busy,
}

impl InputState {
    /// 输入控件是否可用
    pub fn is_enabled(&self) -> bool {
        matches!(self, InputState::Idle)
    }

    /// 是否显示加载指示器
    pub fn shows_busy_indicator(&self) -> bool {
        matches!(self, InputState::Busy)
    }
}

impl fmt::Display for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputState::Idle => "idle",
            InputState::Busy => "busy",
        };
        write!(f, "{}", s)
    }
}
