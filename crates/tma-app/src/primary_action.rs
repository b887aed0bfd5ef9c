//! Registration state for the host-rendered primary action button.
//!
//! The click handler captures the form as it was when bound, so it is
//! re-established on every form change. `rebind` always detaches the
//! previous handler before attaching the next one; at most one handler
//! registered through a binding is live at any time.

use tma_core::ports::{ActionHandler, HandlerId, HostBridgePort};
use tma_core::BridgeError;

use crate::cosmetic::ignore_cosmetic;

#[derive(Debug, Default)]
pub struct PrimaryActionBinding {
    active: Option<HandlerId>,
}

impl PrimaryActionBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_handler(&self) -> Option<HandlerId> {
        self.active
    }

    /// Detach the current handler (if any), then label, attach and show.
    ///
    /// Only attaching is allowed to fail; label, show and detach failures
    /// are cosmetic.
    pub fn rebind(
        &mut self,
        bridge: &dyn HostBridgePort,
        label: &str,
        handler: ActionHandler,
    ) -> Result<HandlerId, BridgeError> {
        self.detach(bridge);

        ignore_cosmetic("set_main_button_text", bridge.set_main_button_text(label));
        let id = bridge.on_main_button_click(handler)?;
        self.active = Some(id);
        ignore_cosmetic("show_main_button", bridge.show_main_button());

        tracing::debug!(handler = id.0, "primary action bound");
        Ok(id)
    }

    pub fn detach(&mut self, bridge: &dyn HostBridgePort) {
        if let Some(id) = self.active.take() {
            ignore_cosmetic("off_main_button_click", bridge.off_main_button_click(id));
        }
    }

    /// Hide the button and drop the handler.
    pub fn teardown(&mut self, bridge: &dyn HostBridgePort) {
        ignore_cosmetic("hide_main_button", bridge.hide_main_button());
        self.detach(bridge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tma_platform::bridge::ops;
    use tma_platform::RecordingBridge;

    fn counting_handler(hits: &Rc<Cell<u32>>) -> ActionHandler {
        let hits = hits.clone();
        Rc::new(move || hits.set(hits.get() + 1))
    }

    #[test]
    fn repeated_rebinds_leave_one_live_handler() {
        let bridge = RecordingBridge::new();
        let hits = Rc::new(Cell::new(0));
        let mut binding = PrimaryActionBinding::new();

        for _ in 0..5 {
            binding
                .rebind(&bridge, "Отправить боту", counting_handler(&hits))
                .unwrap();
        }
        bridge.click_main_button();

        assert_eq!(bridge.active_handler_count(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(bridge.call_count(ops::OFF_MAIN_BUTTON_CLICK), 4);
    }

    #[test]
    fn detach_happens_before_attach() {
        let bridge = RecordingBridge::new();
        let hits = Rc::new(Cell::new(0));
        let mut binding = PrimaryActionBinding::new();
        binding.rebind(&bridge, "A", counting_handler(&hits)).unwrap();

        binding.rebind(&bridge, "B", counting_handler(&hits)).unwrap();

        let calls = bridge.calls();
        let off = calls.iter().rposition(|c| *c == ops::OFF_MAIN_BUTTON_CLICK).unwrap();
        let on = calls.iter().rposition(|c| *c == ops::ON_MAIN_BUTTON_CLICK).unwrap();
        assert!(off < on);
        assert_eq!(bridge.main_button_text(), "B");
        assert!(bridge.main_button_visible());
    }

    #[test]
    fn cosmetic_failures_do_not_block_binding() {
        let bridge = RecordingBridge::new();
        bridge.fail_on(ops::SET_MAIN_BUTTON_TEXT);
        bridge.fail_on(ops::SHOW_MAIN_BUTTON);
        let mut binding = PrimaryActionBinding::new();

        let id = binding
            .rebind(&bridge, "x", Rc::new(|| {}))
            .expect("attach must succeed");

        assert_eq!(binding.active_handler(), Some(id));
    }

    #[test]
    fn teardown_hides_and_detaches_even_when_host_throws() {
        let bridge = RecordingBridge::new();
        let mut binding = PrimaryActionBinding::new();
        binding.rebind(&bridge, "x", Rc::new(|| {})).unwrap();
        bridge.fail_on(ops::HIDE_MAIN_BUTTON);

        binding.teardown(&bridge);

        assert_eq!(binding.active_handler(), None);
        assert_eq!(bridge.active_handler_count(), 0);
    }
}
