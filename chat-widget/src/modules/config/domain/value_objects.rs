// Config Domain Value Objects
//
// 配置领域值对象定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 回复生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderKind {
    /// 本地关键词匹配
    #[default]
    Canned,
    /// 调用 HTTP 后端
    Http,
}

impl fmt::Display for ResponderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponderKind::Canned => "canned",
            ResponderKind::Http => "http",
        };
        write!(f, "{}", s)
    }
}

/// 快捷选项按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickOption {
    /// 按钮文字
    pub label: String,
    /// 点击后提交的预设文本
    pub option: String,
}

impl QuickOption {
    pub fn new(label: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            option: option.into(),
        }
    }
}
