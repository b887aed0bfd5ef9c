//! Adapter over the host's `window.Telegram.WebApp` object.
//!
//! Every host call goes through [`call_method`], which looks the function up
//! by name at call time. A host object missing a method yields a
//! [`BridgeError`] instead of a JS exception.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use tma_core::ports::{
    ActionHandler, BridgeDetectorPort, HandlerId, HostBridgePort, ThemeListener,
};
use tma_core::{BridgeError, ColorScheme, LaunchUser};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Platform value the host script reports outside the messaging client.
const UNKNOWN_PLATFORM: &str = "unknown";

pub struct TelegramWebAppBridge {
    web_app: JsValue,
    click_closures: RefCell<HashMap<HandlerId, Closure<dyn Fn()>>>,
    theme_closures: RefCell<Vec<Closure<dyn Fn()>>>,
    next_handler: Cell<u64>,
}

impl TelegramWebAppBridge {
    fn new(web_app: JsValue) -> Self {
        Self {
            web_app,
            click_closures: RefCell::new(HashMap::new()),
            theme_closures: RefCell::new(Vec::new()),
            next_handler: Cell::new(0),
        }
    }

    fn main_button(&self, operation: &'static str) -> Result<JsValue, BridgeError> {
        property(&self.web_app, "MainButton")
            .filter(JsValue::is_object)
            .ok_or_else(|| BridgeError::call(operation, "MainButton missing"))
    }
}

impl HostBridgePort for TelegramWebAppBridge {
    fn ready(&self) -> Result<(), BridgeError> {
        call_method(&self.web_app, "ready", "ready", &[]).map(|_| ())
    }

    fn expand(&self) -> Result<(), BridgeError> {
        call_method(&self.web_app, "expand", "expand", &[]).map(|_| ())
    }

    fn launch_user(&self) -> Option<LaunchUser> {
        let user = property(&self.web_app, "initDataUnsafe")
            .and_then(|unsafe_data| property(&unsafe_data, "user"))
            .filter(JsValue::is_object)?;
        let json: String = js_sys::JSON::stringify(&user).ok()?.into();
        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(error = %err, "launch user has unexpected shape");
                None
            }
        }
    }

    fn init_data(&self) -> Option<String> {
        property(&self.web_app, "initData")
            .and_then(|value| value.as_string())
            .filter(|data| !data.is_empty())
    }

    fn color_scheme(&self) -> Option<ColorScheme> {
        property(&self.web_app, "colorScheme")
            .and_then(|value| value.as_string())
            .and_then(|value| ColorScheme::parse(&value))
    }

    fn on_theme_changed(&self, listener: ThemeListener) -> Result<(), BridgeError> {
        let web_app = self.web_app.clone();
        let closure: Closure<dyn Fn()> = Closure::new(move || {
            let scheme = property(&web_app, "colorScheme")
                .and_then(|value| value.as_string())
                .and_then(|value| ColorScheme::parse(&value));
            if let Some(scheme) = scheme {
                listener(scheme);
            }
        });
        call_method(
            &self.web_app,
            "onEvent",
            "on_theme_changed",
            &[JsValue::from_str("themeChanged"), closure.as_ref().clone()],
        )?;
        self.theme_closures.borrow_mut().push(closure);
        Ok(())
    }

    fn send_data(&self, data: &str) -> Result<(), BridgeError> {
        call_method(&self.web_app, "sendData", "send_data", &[JsValue::from_str(data)]).map(|_| ())
    }

    fn set_main_button_text(&self, text: &str) -> Result<(), BridgeError> {
        let button = self.main_button("set_main_button_text")?;
        call_method(&button, "setText", "set_main_button_text", &[JsValue::from_str(text)])
            .map(|_| ())
    }

    fn show_main_button(&self) -> Result<(), BridgeError> {
        let button = self.main_button("show_main_button")?;
        call_method(&button, "show", "show_main_button", &[]).map(|_| ())
    }

    fn hide_main_button(&self) -> Result<(), BridgeError> {
        let button = self.main_button("hide_main_button")?;
        call_method(&button, "hide", "hide_main_button", &[]).map(|_| ())
    }

    fn on_main_button_click(&self, handler: ActionHandler) -> Result<HandlerId, BridgeError> {
        let button = self.main_button("on_main_button_click")?;
        let closure: Closure<dyn Fn()> = Closure::new(move || handler());
        call_method(
            &button,
            "onClick",
            "on_main_button_click",
            &[closure.as_ref().clone()],
        )?;

        let id = HandlerId(self.next_handler.get());
        self.next_handler.set(id.0 + 1);
        self.click_closures.borrow_mut().insert(id, closure);
        Ok(id)
    }

    fn off_main_button_click(&self, id: HandlerId) -> Result<(), BridgeError> {
        let button = self.main_button("off_main_button_click")?;
        // offClick matches by function identity, so pass the very same closure.
        let function = self
            .click_closures
            .borrow()
            .get(&id)
            .map(|closure| closure.as_ref().clone())
            .ok_or_else(|| BridgeError::call("off_main_button_click", "unknown handler"))?;
        call_method(&button, "offClick", "off_main_button_click", &[function])?;

        // Still registered with the host until offClick succeeds.
        self.click_closures.borrow_mut().remove(&id);
        Ok(())
    }
}

/// Detects `window.Telegram.WebApp` launched inside the messaging client.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramDetector;

impl BridgeDetectorPort for TelegramDetector {
    fn detect(&self) -> Option<Rc<dyn HostBridgePort>> {
        let global: JsValue = js_sys::global().into();
        let web_app = property(&global, "Telegram")
            .and_then(|telegram| property(&telegram, "WebApp"))
            .filter(JsValue::is_object)?;

        let has_entry_points = ["ready", "sendData"]
            .iter()
            .all(|name| property(&web_app, name).is_some_and(|f| f.is_function()));
        if !has_entry_points {
            tracing::warn!("Telegram.WebApp present but incomplete, treating as absent");
            return None;
        }

        let platform = property(&web_app, "platform")
            .and_then(|value| value.as_string())
            .unwrap_or_else(|| UNKNOWN_PLATFORM.to_string());
        if platform == UNKNOWN_PLATFORM {
            tracing::info!("Telegram.WebApp loaded outside the client, bridge absent");
            return None;
        }

        tracing::info!(platform = %platform, "Telegram bridge detected");
        Some(Rc::new(TelegramWebAppBridge::new(web_app)))
    }
}

fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    if !target.is_object() {
        return None;
    }
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn call_method(
    target: &JsValue,
    method: &str,
    operation: &'static str,
    args: &[JsValue],
) -> Result<JsValue, BridgeError> {
    let function: Function = property(target, method)
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| BridgeError::call(operation, format!("`{method}` is not a function")))?;

    let result = match args {
        [] => function.call0(target),
        [a] => function.call1(target, a),
        [a, b] => function.call2(target, a, b),
        _ => return Err(BridgeError::call(operation, "too many arguments")),
    };
    result.map_err(|err| BridgeError::call(operation, js_error_message(&err)))
}

fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string()
        .unwrap_or_else(|| "unknown JavaScript error".to_string())
}
