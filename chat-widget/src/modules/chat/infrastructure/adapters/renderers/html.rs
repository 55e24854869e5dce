// HTML 渲染器
//
// 维护消息列表的 HTML 片段，只做追加；文本一律走转义路径

use std::sync::{Mutex, MutexGuard};

use crate::modules::chat::domain::{InputState, MessageView};
use crate::modules::chat::ports::RendererPort;

/// 生成单条消息气泡的 HTML
pub fn message_markup(view: &MessageView) -> String {
    format!(
        r#"<div class="message {class}">
    <div class="message-content">
        <i class="fas {icon}"></i>
        <p>{text}</p>
    </div>
    <span class="timestamp">{time}</span>
</div>"#,
        class = view.css_class(),
        icon = view.icon_class(),
        text = view.escaped_text,
        time = view.time_label,
    )
}

#[derive(Debug)]
struct HtmlDocument {
    messages: Vec<String>,
    input_enabled: bool,
    busy: bool,
    focused: bool,
    scroll_top: usize,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            input_enabled: true,
            busy: false,
            focused: false,
            scroll_top: 0,
        }
    }
}

/// HTML 渲染器
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    document: Mutex<HtmlDocument>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn document(&self) -> MutexGuard<'_, HtmlDocument> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 完整的消息列表
    pub fn markup(&self) -> String {
        let document = self.document();
        format!(
            "<div id=\"chatMessages\" class=\"chat-messages\">\n{}\n</div>",
            document.messages.join("\n")
        )
    }

    pub fn message_count(&self) -> usize {
        self.document().messages.len()
    }

    pub fn input_enabled(&self) -> bool {
        self.document().input_enabled
    }

    pub fn is_busy(&self) -> bool {
        self.document().busy
    }

    pub fn has_focus(&self) -> bool {
        self.document().focused
    }

    /// 是否停留在最新一条消息
    pub fn is_scrolled_to_bottom(&self) -> bool {
        let document = self.document();
        document.scroll_top == document.messages.len()
    }
}

impl RendererPort for HtmlRenderer {
    fn append(&self, view: &MessageView) {
        let mut document = self.document();
        document.messages.push(message_markup(view));
        document.scroll_top = document.messages.len();
    }

    fn set_input_state(&self, state: InputState) {
        let mut document = self.document();
        document.input_enabled = state.is_enabled();
        document.busy = state.shows_busy_indicator();
        document.focused = state.is_enabled();
    }
}
