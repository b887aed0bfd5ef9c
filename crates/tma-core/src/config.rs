//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value calculation / 禁止默认值计算**
//!
//! Defaults (fallback choice set, button label) are applied at wiring time.
//! An empty `api_url` is a fact here; the send use case decides what it means.

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL, as written (may be empty, may end with `/`)
    pub api_url: String,

    /// Client-side request timeout in seconds, `None` when not configured
    pub request_timeout_secs: Option<u64>,

    /// Glyphs for the emoji selector (may be empty)
    pub choices: Vec<String>,

    /// Label for the host-rendered primary action button (may be empty)
    pub main_button_text: String,

    /// Native preview only: run against the in-memory bridge
    pub emulate_bridge: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// Missing sections and keys become empty values. Values of the wrong
    /// type are treated as missing.
    pub fn from_toml(toml_value: &toml::Value) -> Self {
        Self {
            api_url: toml_value
                .get("backend")
                .and_then(|b| b.get("api_url"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            request_timeout_secs: toml_value
                .get("backend")
                .and_then(|b| b.get("request_timeout_secs"))
                .and_then(|v| v.as_integer())
                .and_then(|secs| u64::try_from(secs).ok()),
            choices: toml_value
                .get("ui")
                .and_then(|u| u.get("choices"))
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
            main_button_text: toml_value
                .get("ui")
                .and_then(|u| u.get("main_button_text"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            emulate_bridge: toml_value
                .get("bridge")
                .and_then(|b| b.get("emulate"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        }
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            api_url: String::new(),
            request_timeout_secs: None,
            choices: Vec::new(),
            main_button_text: String::new(),
            emulate_bridge: false,
        }
    }
}
