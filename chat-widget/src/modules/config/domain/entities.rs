// Config Domain Entities
//
// 配置领域实体定义

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::value_objects::{QuickOption, ResponderKind};

/// 通用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralConfig {
    /// 时间标签格式（chrono strftime）
    pub time_format: String,
    /// 回复失败时的兜底消息
    pub fallback_message: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            time_format: "%H:%M".to_string(),
            fallback_message: "Desculpe, tive um problema. Pode repetir?".to_string(),
        }
    }
}

/// Responder 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponderConfig {
    pub kind: ResponderKind,
    /// 关键词匹配的模拟延迟（毫秒）
    pub latency_ms: u64,
    /// HTTP 后端地址
    pub endpoint: Option<String>,
    /// HTTP 请求超时（秒），为空时不限制
    pub timeout_secs: Option<u64>,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            kind: ResponderKind::default(),
            latency_ms: 1000,
            endpoint: None,
            timeout_secs: None,
        }
    }
}

/// 历史配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryConfig {
    pub storage_key: String,
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_key: "chatHistory".to_string(),
            max_entries: 50,
        }
    }
}

fn default_quick_options() -> Vec<QuickOption> {
    vec![
        QuickOption::new("Serviços", "Quais são os serviços?"),
        QuickOption::new("Preços", "Quais são os preços?"),
        QuickOption::new("Contato", "Como entrar em contato?"),
        QuickOption::new("Suporte", "Preciso de suporte"),
    ]
}

/// 组件配置聚合根
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    pub general: GeneralConfig,
    pub responder: ResponderConfig,
    pub history: HistoryConfig,
    pub quick_options: Vec<QuickOption>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            responder: ResponderConfig::default(),
            history: HistoryConfig::default(),
            quick_options: default_quick_options(),
        }
    }
}

impl WidgetConfig {
    /// 验证配置是否有效
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.general.time_format.trim().is_empty() {
            errors.push("Time format must not be empty".to_string());
        } else if StrftimeItems::new(&self.general.time_format)
            .any(|item| matches!(item, Item::Error))
        {
            errors.push(format!("Invalid time format: {}", self.general.time_format));
        }

        if self.history.storage_key.trim().is_empty() {
            errors.push("History storage key must not be empty".to_string());
        }

        if self.history.max_entries == 0 {
            errors.push("History must keep at least one entry".to_string());
        }

        if self.responder.kind == ResponderKind::Http {
            match self.responder.endpoint.as_deref() {
                Some(endpoint) if endpoint.starts_with("http://") || endpoint.starts_with("https://") => {}
                Some(endpoint) => errors.push(format!("Invalid responder endpoint: {}", endpoint)),
                None => errors.push("HTTP responder requires an endpoint".to_string()),
            }
        }

        if self.quick_options.iter().any(|o| o.option.trim().is_empty()) {
            errors.push("Quick options must not be blank".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
