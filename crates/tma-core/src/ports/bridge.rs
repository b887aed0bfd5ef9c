use std::rc::Rc;

use crate::error::BridgeError;
use crate::launch::{ColorScheme, LaunchUser};

/// Click handler attached to the host-rendered primary action button.
pub type ActionHandler = Rc<dyn Fn()>;

/// Callback invoked when the host pushes a new color scheme.
pub type ThemeListener = Rc<dyn Fn(ColorScheme)>;

/// Identifies an attached click handler so it can be detached later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(pub u64);

/// The host messaging client's in-app bridge object.
///
/// Every method maps to one host entry point. Implementations must convert
/// host exceptions into [`BridgeError`] rather than panic.
pub trait HostBridgePort {
    /// Readiness signal.
    fn ready(&self) -> Result<(), BridgeError>;

    /// Ask the host to expand the viewport.
    fn expand(&self) -> Result<(), BridgeError>;

    /// Launch-context user, if the host provided one.
    fn launch_user(&self) -> Option<LaunchUser>;

    /// Raw signed launch data, passed through to the backend unread.
    fn init_data(&self) -> Option<String>;

    fn color_scheme(&self) -> Option<ColorScheme>;

    fn on_theme_changed(&self, listener: ThemeListener) -> Result<(), BridgeError>;

    /// One-way channel to the bot. No acknowledgment is available.
    fn send_data(&self, data: &str) -> Result<(), BridgeError>;

    fn set_main_button_text(&self, text: &str) -> Result<(), BridgeError>;

    fn show_main_button(&self) -> Result<(), BridgeError>;

    fn hide_main_button(&self) -> Result<(), BridgeError>;

    fn on_main_button_click(&self, handler: ActionHandler) -> Result<HandlerId, BridgeError>;

    fn off_main_button_click(&self, id: HandlerId) -> Result<(), BridgeError>;
}

/// Finds the host bridge in the current environment.
///
/// Must not fail: a partially initialized host object counts as absent.
pub trait BridgeDetectorPort {
    fn detect(&self) -> Option<Rc<dyn HostBridgePort>>;
}
