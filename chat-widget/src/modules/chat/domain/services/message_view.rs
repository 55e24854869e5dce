use std::fmt::Write;

use chrono::{FixedOffset, Local, Offset, TimeZone, Utc};
use serde::Serialize;

use super::super::entities::{ChatMessage, Sender};

/// 默认时间格式（两位小时:两位分钟）
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// 时间无法格式化时显示的占位标签
pub const UNKNOWN_TIME_LABEL: &str = "--:--";

/// 转义 HTML 特殊字符，文本只会按字面显示
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 时间标签使用的时区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOffset {
    Local,
    Fixed(FixedOffset),
}

/// 时间标签格式化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLabelFormatter {
    pattern: String,
    offset: DisplayOffset,
}

impl TimeLabelFormatter {
    pub fn new(pattern: impl Into<String>, offset: DisplayOffset) -> Self {
        Self {
            pattern: pattern.into(),
            offset,
        }
    }

    /// 固定使用 UTC（测试和服务端渲染）
    pub fn utc(pattern: impl Into<String>) -> Self {
        Self::new(pattern, DisplayOffset::Fixed(Utc.fix()))
    }

    /// 格式化毫秒时间戳
    ///
    /// 时间戳越界或格式串无效时返回占位标签，不会 panic
    pub fn format(&self, timestamp_ms: i64) -> String {
        let Some(instant) = Utc.timestamp_millis_opt(timestamp_ms).single() else {
            return UNKNOWN_TIME_LABEL.to_string();
        };

        let mut label = String::new();
        let written = match self.offset {
            DisplayOffset::Local => {
                write!(label, "{}", instant.with_timezone(&Local).format(&self.pattern))
            }
            DisplayOffset::Fixed(offset) => {
                write!(label, "{}", instant.with_timezone(&offset).format(&self.pattern))
            }
        };

        match written {
            Ok(()) => label,
            Err(_) => {
                tracing::warn!("[TimeLabelFormatter] Invalid time format: {:?}", self.pattern);
                UNKNOWN_TIME_LABEL.to_string()
            }
        }
    }
}

impl Default for TimeLabelFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT, DisplayOffset::Local)
    }
}

/// 消息的视图描述
///
/// 由 ChatMessage 纯函数生成，渲染器只负责追加
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub sender: Sender,
    /// 原始文本（仅供非 HTML 渲染端使用）
    pub text: String,
    /// 已转义的文本
    pub escaped_text: String,
    pub time_label: String,
}

impl MessageView {
    pub fn build(message: &ChatMessage, formatter: &TimeLabelFormatter) -> Self {
        Self {
            sender: message.sender(),
            text: message.text().to_string(),
            escaped_text: escape_html(message.text()),
            time_label: formatter.format(message.timestamp()),
        }
    }

    pub fn css_class(&self) -> &'static str {
        self.sender.css_class()
    }

    pub fn icon_class(&self) -> &'static str {
        self.sender.icon_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b \"c\""), "a &amp; b &quot;c&quot;");
        assert_eq!(escape_html("preços"), "preços");
    }

    #[test]
    fn test_time_label() {
        let formatter = TimeLabelFormatter::utc(DEFAULT_TIME_FORMAT);
        // 2023-11-14T22:13:20Z
        assert_eq!(formatter.format(1_700_000_000_000), "22:13");
    }

    #[test]
    fn test_fixed_offset_label() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let formatter = TimeLabelFormatter::new("%H:%M", DisplayOffset::Fixed(brt));
        assert_eq!(formatter.format(1_700_000_000_000), "19:13");
    }

    #[test]
    fn test_out_of_range_timestamp() {
        let formatter = TimeLabelFormatter::utc(DEFAULT_TIME_FORMAT);
        assert_eq!(formatter.format(i64::MAX), "--:--");
    }

    #[test]
    fn test_invalid_pattern_falls_back() {
        for pattern in ["%Q", "%H:%"] {
            let formatter = TimeLabelFormatter::utc(pattern);
            assert_eq!(formatter.format(1_700_000_000_000), UNKNOWN_TIME_LABEL);
        }
    }

    #[test]
    fn test_build_view() {
        let msg = ChatMessage::from_parts("<b>oi</b>", Sender::Bot, 0);
        let view = MessageView::build(&msg, &TimeLabelFormatter::utc("%H:%M"));

        assert_eq!(view.css_class(), "bot");
        assert_eq!(view.icon_class(), "fa-robot");
        assert_eq!(view.text, "<b>oi</b>");
        assert_eq!(view.escaped_text, "&lt;b&gt;oi&lt;/b&gt;");
        assert_eq!(view.time_label, "00:00");
    }
}
