/// 按键
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other(String),
}

/// 输入框上的按键事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key, shift: bool) -> Self {
        Self { key, shift }
    }

    pub fn enter() -> Self {
        Self::new(Key::Enter, false)
    }

    pub fn shift_enter() -> Self {
        Self::new(Key::Enter, true)
    }

    /// 不带 Shift 的回车触发提交
    pub fn is_submit(&self) -> bool {
        self.key == Key::Enter && !self.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_enter_submits() {
        assert!(KeyEvent::enter().is_submit());
        assert!(!KeyEvent::shift_enter().is_submit());
        assert!(!KeyEvent::new(Key::Char('a'), false).is_submit());
    }
}
