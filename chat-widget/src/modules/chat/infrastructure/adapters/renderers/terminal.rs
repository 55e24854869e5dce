// 终端渲染器
//
// 按行输出消息；控制字符在输出前被过滤

use std::io::{self, Write};
use std::sync::Mutex;

use crate::modules::chat::domain::{InputState, MessageView, Sender};
use crate::modules::chat::ports::RendererPort;

/// 去掉除换行外的控制字符，避免转义序列注入终端
pub fn sanitize_for_terminal(text: &str) -> String {
    text.chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect()
}

pub struct TerminalRenderer {
    out: Mutex<Box<dyn Write + Send>>,
    user_label: String,
    bot_label: String,
}

impl TerminalRenderer {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            user_label: "Você".to_string(),
            bot_label: "Assistente".to_string(),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn label(&self, sender: Sender) -> &str {
        match sender {
            Sender::User => &self.user_label,
            Sender::Bot => &self.bot_label,
        }
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::warn!("[TerminalRenderer] Failed to write output: {}", e);
        }
    }
}

impl RendererPort for TerminalRenderer {
    fn append(&self, view: &MessageView) {
        let line = format!(
            "[{}] {}: {}",
            view.time_label,
            self.label(view.sender),
            sanitize_for_terminal(&view.text)
        );
        self.write_line(&line);
    }

    fn set_input_state(&self, state: InputState) {
        if state.shows_busy_indicator() {
            self.write_line("...");
        }
    }
}
