//! In-memory bridge.
//!
//! Stands in for the host in tests and in the native preview: records every
//! call, keeps the primary button's state, and lets the caller inject
//! failures per operation.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};

use tma_core::ports::{ActionHandler, HandlerId, HostBridgePort, ThemeListener};
use tma_core::{BridgeError, ColorScheme, LaunchUser};

/// Operation names as recorded by [`RecordingBridge::calls`].
pub mod ops {
    pub const READY: &str = "ready";
    pub const EXPAND: &str = "expand";
    pub const ON_THEME_CHANGED: &str = "on_theme_changed";
    pub const SEND_DATA: &str = "send_data";
    pub const SET_MAIN_BUTTON_TEXT: &str = "set_main_button_text";
    pub const SHOW_MAIN_BUTTON: &str = "show_main_button";
    pub const HIDE_MAIN_BUTTON: &str = "hide_main_button";
    pub const ON_MAIN_BUTTON_CLICK: &str = "on_main_button_click";
    pub const OFF_MAIN_BUTTON_CLICK: &str = "off_main_button_click";
}

#[derive(Default)]
pub struct RecordingBridge {
    user: Option<LaunchUser>,
    init_data: Option<String>,
    scheme: Cell<Option<ColorScheme>>,
    failing: RefCell<HashSet<&'static str>>,
    calls: RefCell<Vec<&'static str>>,
    sent: RefCell<Vec<String>>,
    theme_listeners: RefCell<Vec<ThemeListener>>,
    main_button_text: RefCell<String>,
    main_button_visible: Cell<bool>,
    handlers: RefCell<BTreeMap<HandlerId, ActionHandler>>,
    next_handler: Cell<u64>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: LaunchUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_init_data(mut self, init_data: impl Into<String>) -> Self {
        self.init_data = Some(init_data.into());
        self
    }

    pub fn with_scheme(self, scheme: ColorScheme) -> Self {
        self.scheme.set(Some(scheme));
        self
    }

    /// Make every later call to `operation` fail.
    pub fn fail_on(&self, operation: &'static str) {
        self.failing.borrow_mut().insert(operation);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == operation).count()
    }

    /// Payloads delivered through the one-way channel, oldest first.
    pub fn sent_data(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }

    pub fn active_handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn main_button_text(&self) -> String {
        self.main_button_text.borrow().clone()
    }

    pub fn main_button_visible(&self) -> bool {
        self.main_button_visible.get()
    }

    /// Press the host button: every attached handler runs once.
    pub fn click_main_button(&self) {
        // Handlers may call back into the bridge, so release the borrow first.
        let handlers: Vec<ActionHandler> = self.handlers.borrow().values().cloned().collect();
        for handler in handlers {
            handler();
        }
    }

    /// Simulate the host's theme-change notification.
    pub fn push_theme(&self, scheme: ColorScheme) {
        self.scheme.set(Some(scheme));
        let listeners: Vec<ThemeListener> = self.theme_listeners.borrow().clone();
        for listener in listeners {
            listener(scheme);
        }
    }

    fn record(&self, operation: &'static str) -> Result<(), BridgeError> {
        self.calls.borrow_mut().push(operation);
        if self.failing.borrow().contains(operation) {
            return Err(BridgeError::call(operation, "injected failure"));
        }
        Ok(())
    }
}

impl HostBridgePort for RecordingBridge {
    fn ready(&self) -> Result<(), BridgeError> {
        self.record(ops::READY)
    }

    fn expand(&self) -> Result<(), BridgeError> {
        self.record(ops::EXPAND)
    }

    fn launch_user(&self) -> Option<LaunchUser> {
        self.user.clone()
    }

    fn init_data(&self) -> Option<String> {
        self.init_data.clone()
    }

    fn color_scheme(&self) -> Option<ColorScheme> {
        self.scheme.get()
    }

    fn on_theme_changed(&self, listener: ThemeListener) -> Result<(), BridgeError> {
        self.record(ops::ON_THEME_CHANGED)?;
        self.theme_listeners.borrow_mut().push(listener);
        Ok(())
    }

    fn send_data(&self, data: &str) -> Result<(), BridgeError> {
        self.record(ops::SEND_DATA)?;
        tracing::info!(bytes = data.len(), data, "bridge.send_data");
        self.sent.borrow_mut().push(data.to_string());
        Ok(())
    }

    fn set_main_button_text(&self, text: &str) -> Result<(), BridgeError> {
        self.record(ops::SET_MAIN_BUTTON_TEXT)?;
        *self.main_button_text.borrow_mut() = text.to_string();
        Ok(())
    }

    fn show_main_button(&self) -> Result<(), BridgeError> {
        self.record(ops::SHOW_MAIN_BUTTON)?;
        self.main_button_visible.set(true);
        Ok(())
    }

    fn hide_main_button(&self) -> Result<(), BridgeError> {
        self.record(ops::HIDE_MAIN_BUTTON)?;
        self.main_button_visible.set(false);
        Ok(())
    }

    fn on_main_button_click(&self, handler: ActionHandler) -> Result<HandlerId, BridgeError> {
        self.record(ops::ON_MAIN_BUTTON_CLICK)?;
        let id = HandlerId(self.next_handler.get());
        self.next_handler.set(id.0 + 1);
        self.handlers.borrow_mut().insert(id, handler);
        Ok(id)
    }

    fn off_main_button_click(&self, id: HandlerId) -> Result<(), BridgeError> {
        self.record(ops::OFF_MAIN_BUTTON_CLICK)?;
        self.handlers.borrow_mut().remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn click_runs_each_attached_handler_once() {
        let bridge = RecordingBridge::new();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let first = bridge
            .on_main_button_click(Rc::new(move || counter.set(counter.get() + 1)))
            .unwrap();
        let counter = hits.clone();
        bridge
            .on_main_button_click(Rc::new(move || counter.set(counter.get() + 10)))
            .unwrap();
        bridge.off_main_button_click(first).unwrap();

        bridge.click_main_button();

        assert_eq!(hits.get(), 10);
        assert_eq!(bridge.active_handler_count(), 1);
    }

    #[test]
    fn injected_failure_is_recorded_and_reported() {
        let bridge = RecordingBridge::new();
        bridge.fail_on(ops::SEND_DATA);

        let err = bridge.send_data("{}").unwrap_err();

        assert_eq!(err, BridgeError::call(ops::SEND_DATA, "injected failure"));
        assert_eq!(bridge.call_count(ops::SEND_DATA), 1);
        assert!(bridge.sent_data().is_empty());
    }

    #[test]
    fn push_theme_reaches_listeners_and_updates_scheme() {
        let bridge = RecordingBridge::new().with_scheme(ColorScheme::Light);
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        bridge
            .on_theme_changed(Rc::new(move |scheme| sink.set(Some(scheme))))
            .unwrap();

        bridge.push_theme(ColorScheme::Dark);

        assert_eq!(seen.get(), Some(ColorScheme::Dark));
        assert_eq!(bridge.color_scheme(), Some(ColorScheme::Dark));
    }
}
