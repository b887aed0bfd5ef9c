//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Apply the `MINIAPP_API_URL` override / 应用 `MINIAPP_API_URL` 覆盖
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value logic / 禁止默认值逻辑** (see `wiring.rs`)
//!
//! ## Sources / 来源
//!
//! - Native: `miniapp.toml` in the working directory (optional), `.env`
//!   (optional), then the process environment.
//! - wasm32: no file system; the backend URL is baked in at build time
//!   from `MINIAPP_API_URL`, the way a bundler inlines its build env.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tma_core::AppConfig;

/// Config file looked up by the native preview.
pub const CONFIG_FILE: &str = "miniapp.toml";

/// Environment variable carrying the backend base URL.
pub const API_URL_ENV: &str = "MINIAPP_API_URL";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// **NO validation is performed**: empty strings, empty choice lists and
/// missing sections are accepted as facts.
/// **不执行任何验证**：空字符串、空列表和缺失的部分都按事实接受。
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error) / 无法读取文件
/// - Content is not valid TOML (parse error) / 内容不是有效的 TOML
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    Ok(AppConfig::from_toml(&toml_value))
}

/// Resolve the effective configuration for this process.
/// 解析当前进程的有效配置。
#[cfg(not(target_arch = "wasm32"))]
pub fn resolve_config() -> anyhow::Result<AppConfig> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err).context("Failed to load .env file");
        }
    }

    resolve_config_from(Path::new(CONFIG_FILE), std::env::var(API_URL_ENV).ok())
}

#[cfg(target_arch = "wasm32")]
pub fn resolve_config() -> anyhow::Result<AppConfig> {
    Ok(with_api_url_override(
        AppConfig::empty(),
        option_env!("MINIAPP_API_URL").map(str::to_string),
    ))
}

/// File (when it exists) plus the environment override.
pub fn resolve_config_from(
    config_path: &Path,
    env_api_url: Option<String>,
) -> anyhow::Result<AppConfig> {
    let config = if config_path.exists() {
        load_config(config_path.to_path_buf())?
    } else {
        tracing::debug!(path = %config_path.display(), "no config file, starting empty");
        AppConfig::empty()
    };

    Ok(with_api_url_override(config, env_api_url))
}

fn with_api_url_override(mut config: AppConfig, env_api_url: Option<String>) -> AppConfig {
    if let Some(api_url) = env_api_url {
        config.api_url = api_url;
    }
    config
}
