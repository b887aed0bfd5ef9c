//! Presence-aware facade over the host bridge.
//!
//! The screen branches on bridge presence here and nowhere else. With no
//! bridge, reads return nothing, cosmetic calls are skipped, and channel
//! operations fail with [`MiniAppError::BridgeUnavailable`].

use std::rc::Rc;

use tma_core::payload::MAX_SEND_DATA_BYTES;
use tma_core::ports::{
    ActionHandler, BridgeDetectorPort, HostBridgePort, SystemThemePort, ThemeListener,
};
use tma_core::{BotMessage, ColorScheme, LaunchUser, MiniAppError};

use crate::cosmetic::ignore_cosmetic;
use crate::primary_action::PrimaryActionBinding;

#[derive(Clone, Default)]
pub struct BridgeAdapter {
    handle: Option<Rc<dyn HostBridgePort>>,
}

impl BridgeAdapter {
    pub fn detect(detector: &dyn BridgeDetectorPort) -> Self {
        let handle = detector.detect();
        tracing::info!(present = handle.is_some(), "bridge detection finished");
        Self { handle }
    }

    pub fn absent() -> Self {
        Self { handle: None }
    }

    pub fn from_handle(handle: Rc<dyn HostBridgePort>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub fn is_present(&self) -> bool {
        self.handle.is_some()
    }

    /// Readiness signal and viewport expansion. Never fails.
    pub fn initialize(&self) {
        let Some(bridge) = &self.handle else {
            return;
        };
        ignore_cosmetic("ready", bridge.ready());
        ignore_cosmetic("expand", bridge.expand());
    }

    pub fn launch_user(&self) -> Option<LaunchUser> {
        self.handle.as_ref().and_then(|bridge| bridge.launch_user())
    }

    pub fn init_data(&self) -> Option<String> {
        self.handle.as_ref().and_then(|bridge| bridge.init_data())
    }

    /// Current scheme, registering `on_change` for host theme notifications.
    ///
    /// The bridge's scheme wins; the system preference fills in when there
    /// is no bridge or it reports nothing.
    pub fn color_scheme(
        &self,
        system: &dyn SystemThemePort,
        on_change: ThemeListener,
    ) -> ColorScheme {
        let Some(bridge) = &self.handle else {
            return system.preferred_scheme();
        };
        ignore_cosmetic("on_theme_changed", bridge.on_theme_changed(on_change));
        bridge
            .color_scheme()
            .unwrap_or_else(|| system.preferred_scheme())
    }

    /// Serialize and hand to the one-way channel. Fire-and-forget: success
    /// means the host accepted the call, not that the bot received it.
    pub fn send_one_way(&self, message: &BotMessage) -> Result<(), MiniAppError> {
        let bridge = self.handle.as_ref().ok_or(MiniAppError::BridgeUnavailable)?;

        let data = message
            .to_json()
            .map_err(|err| MiniAppError::BridgeSend(err.to_string()))?;
        if data.len() > MAX_SEND_DATA_BYTES {
            return Err(MiniAppError::BridgeSend(format!(
                "payload is {} bytes, limit is {MAX_SEND_DATA_BYTES}",
                data.len()
            )));
        }

        bridge.send_data(&data).map_err(MiniAppError::from)
    }

    pub fn bind_primary_action(
        &self,
        binding: &mut PrimaryActionBinding,
        label: &str,
        on_trigger: ActionHandler,
    ) -> Result<(), MiniAppError> {
        let bridge = self.handle.as_ref().ok_or(MiniAppError::BridgeUnavailable)?;
        binding
            .rebind(bridge.as_ref(), label, on_trigger)
            .map(|_| ())
            .map_err(|err| MiniAppError::BridgeSend(err.to_string()))
    }

    pub fn unbind_primary_action(&self, binding: &mut PrimaryActionBinding) {
        if let Some(bridge) = &self.handle {
            binding.teardown(bridge.as_ref());
        }
    }
}
