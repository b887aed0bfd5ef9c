//! # Screen Dependencies / 屏幕依赖
//!
//! Dependency grouping for [`MiniAppScreen`](crate::MiniAppScreen) construction.
//! 用于构造 MiniAppScreen 的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包
//!
//! Defaults (choice set, button label) are decided by the caller during
//! wiring, never here.

use std::rc::Rc;

use tma_core::ports::{ClockPort, CommandTransportPort, SystemThemePort};
use tma_core::ChoiceSet;

use crate::bridge_adapter::BridgeAdapter;

/// All dependencies are required - no defaults, no optional fields.
/// 所有依赖都是必需的 - 无默认值，无可选字段。
pub struct ScreenDeps {
    // Host dependencies / 宿主依赖
    pub bridge: BridgeAdapter,
    pub system_theme: Rc<dyn SystemThemePort>,

    // Outbound dependencies / 外发依赖
    pub transport: Rc<dyn CommandTransportPort>,
    /// Backend base URL, possibly blank (reported as not configured on send)
    pub api_url: String,

    // System dependencies / 系统依赖
    pub clock: Rc<dyn ClockPort>,

    // UI settings / 界面设置
    pub choices: ChoiceSet,
    pub main_button_text: String,
}
