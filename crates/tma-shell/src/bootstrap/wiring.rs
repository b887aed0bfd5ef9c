//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (HTTP transport, clock) / 创建 infra 层具体实现
//! - ✅ Create platform implementations (bridge, system theme) / 创建 platform 层具体实现
//! - ✅ Apply UI defaults the config left empty / 为空配置项应用界面默认值
//! - ✅ Inject all dependencies into MiniAppScreen / 将所有依赖注入到 MiniAppScreen
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide what a blank backend URL means (the use case does)
//! - 不判断空的后端地址意味着什么（由用例决定）
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on tma-infra + tma-platform + tma-app
//! > simultaneously.**
//! > **这是唯一允许同时依赖 tma-infra、tma-platform 和 tma-app 的地方。**

use std::rc::Rc;
use std::time::Duration;

use tma_app::{BridgeAdapter, MiniAppScreen, ScreenDeps};
use tma_core::ports::{BridgeDetectorPort, SystemThemePort};
use tma_core::{AppConfig, ChoiceSet};
use tma_infra::{ReqwestCommandTransport, SystemClock};
use tma_platform::RecordingBridge;

/// Label used when `ui.main_button_text` is empty.
pub const DEFAULT_MAIN_BUTTON_TEXT: &str = "Отправить боту";

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP transport initialization failed: {0}")]
    TransportInit(String),

    #[error("Bridge emulation is only available in the native preview")]
    EmulationUnsupported,
}

/// The wired screen plus the handles hosts need beside it.
pub struct ScreenHandle {
    pub screen: Rc<MiniAppScreen>,
    /// In-memory host, present when `bridge.emulate` is on
    pub emulated_bridge: Option<Rc<RecordingBridge>>,
}

/// Build the screen from configuration. The screen is not started.
/// 根据配置构建屏幕（尚未启动）。
///
/// # Errors / 错误
///
/// - `TransportInit` if the HTTP client cannot be created
/// - `EmulationUnsupported` if `bridge.emulate` is set in a browser build
pub fn build_screen(config: &AppConfig) -> WiringResult<ScreenHandle> {
    let transport = ReqwestCommandTransport::try_new()
        .map_err(|err| WiringError::TransportInit(err.to_string()))?
        .with_timeout(config.request_timeout_secs.map(Duration::from_secs));

    let (bridge, emulated_bridge) = create_bridge(config)?;

    let deps = ScreenDeps {
        bridge,
        system_theme: create_system_theme(),
        transport: Rc::new(transport),
        api_url: config.api_url.clone(),
        clock: Rc::new(SystemClock),
        choices: choices_or_default(&config.choices),
        main_button_text: main_button_text_or_default(&config.main_button_text),
    };

    tracing::info!(
        bridge = deps.bridge.is_present(),
        emulated = emulated_bridge.is_some(),
        choices = deps.choices.len(),
        api_url_set = !config.api_url.trim().is_empty(),
        "screen wired"
    );

    Ok(ScreenHandle {
        screen: Rc::new(MiniAppScreen::new(deps)),
        emulated_bridge,
    })
}

fn choices_or_default(configured: &[String]) -> ChoiceSet {
    let choices = ChoiceSet::from_items(configured.iter().map(String::as_str));
    if choices.is_empty() {
        ChoiceSet::default()
    } else {
        choices
    }
}

fn main_button_text_or_default(configured: &str) -> String {
    if configured.trim().is_empty() {
        DEFAULT_MAIN_BUTTON_TEXT.to_string()
    } else {
        configured.to_string()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_bridge(
    config: &AppConfig,
) -> WiringResult<(BridgeAdapter, Option<Rc<RecordingBridge>>)> {
    use tma_platform::{FixedDetector, NoBridgeDetector};

    if !config.emulate_bridge {
        return Ok((BridgeAdapter::detect(&NoBridgeDetector), None));
    }

    let bridge = Rc::new(
        RecordingBridge::new()
            .with_user(emulated_user())
            .with_init_data("query_id=preview&user=preview"),
    );
    let detector: &dyn BridgeDetectorPort = &FixedDetector::new(bridge.clone());
    Ok((BridgeAdapter::detect(detector), Some(bridge)))
}

#[cfg(target_arch = "wasm32")]
fn create_bridge(
    config: &AppConfig,
) -> WiringResult<(BridgeAdapter, Option<Rc<RecordingBridge>>)> {
    if config.emulate_bridge {
        return Err(WiringError::EmulationUnsupported);
    }
    let detector: &dyn BridgeDetectorPort = &tma_platform::telegram::TelegramDetector;
    Ok((BridgeAdapter::detect(detector), None))
}

#[cfg(not(target_arch = "wasm32"))]
fn create_system_theme() -> Rc<dyn SystemThemePort> {
    Rc::new(tma_platform::theme::FixedSystemTheme::default())
}

#[cfg(target_arch = "wasm32")]
fn create_system_theme() -> Rc<dyn SystemThemePort> {
    Rc::new(tma_platform::theme::MediaQuerySystemTheme)
}

#[cfg(not(target_arch = "wasm32"))]
fn emulated_user() -> tma_core::LaunchUser {
    tma_core::LaunchUser {
        id: 1,
        first_name: "Preview".to_string(),
        last_name: None,
        username: Some("preview".to_string()),
        language_code: Some("ru".to_string()),
    }
}
