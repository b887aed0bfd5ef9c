//! # MiniAppScreen
//!
//! The single screen component: bridge detection at start, local form state,
//! and the two outbound actions.
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Own form state, status line and color scheme
//! - ✅ Turn every action outcome into a status line (no error escapes)
//! - ✅ Keep the primary action bound to the current form, detach-then-attach
//! - ✅ Notify the host renderer through [`RenderHook`] after each change
//! - ❌ No drawing (hosts draw from [`ScreenView`])
//! - ❌ No host or network access except through the injected ports
//!
//! Single-threaded. Shared state lives behind `Rc<RefCell<..>>`; borrows are
//! never held across bridge calls, render hooks or `.await`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tma_core::ports::{ActionHandler, SystemThemePort, ThemeListener};
use tma_core::{
    BotMessageKind, ChoiceSet, ColorScheme, FormError, FormState, LaunchUser, MiniAppError,
    StatusMessage,
};
use tracing::{debug, info, warn};

use crate::bridge_adapter::BridgeAdapter;
use crate::deps::ScreenDeps;
use crate::primary_action::PrimaryActionBinding;
use crate::usecases::{SendToBot, SendToServer};
use crate::view::ScreenView;

/// Called with a fresh view after every state change.
pub type RenderHook = Rc<dyn Fn(&ScreenView)>;

#[derive(Default)]
struct ScreenState {
    user: Option<LaunchUser>,
    scheme: ColorScheme,
    form: FormState,
    status: StatusMessage,
}

/// State reachable from host callbacks (theme listener, primary action).
struct Shared {
    state: RefCell<ScreenState>,
    render_hook: RefCell<Option<RenderHook>>,
    choices: ChoiceSet,
    bridge_present: bool,
}

impl Shared {
    fn view(&self) -> ScreenView {
        let state = self.state.borrow();
        ScreenView::build(
            state.user.as_ref(),
            state.scheme,
            &state.form,
            &self.choices,
            &state.status,
            self.bridge_present,
        )
    }

    fn render(&self) {
        let hook = self.render_hook.borrow().clone();
        if let Some(hook) = hook {
            let view = self.view();
            hook(&view);
        }
    }

    fn set_status(&self, status: StatusMessage) {
        self.state.borrow_mut().status = status;
        self.render();
    }

    fn set_scheme(&self, scheme: ColorScheme) {
        self.state.borrow_mut().scheme = scheme;
        debug!(scheme = scheme.as_str(), "color scheme applied");
        self.render();
    }

    fn report_bot_send(&self, result: Result<(), MiniAppError>) {
        let status = match &result {
            Ok(()) => StatusMessage::sent_to_bot(),
            Err(err) => StatusMessage::from_error(err),
        };
        self.set_status(status);
    }

    fn form_snapshot(&self) -> FormState {
        self.state.borrow().form.clone()
    }
}

pub struct MiniAppScreen {
    shared: Rc<Shared>,
    bridge: BridgeAdapter,
    system_theme: Rc<dyn SystemThemePort>,
    main_button_text: String,
    binding: RefCell<PrimaryActionBinding>,
    started: Cell<bool>,
    send_to_bot: SendToBot,
    send_to_server: SendToServer,
}

impl MiniAppScreen {
    pub fn new(deps: ScreenDeps) -> Self {
        let ScreenDeps {
            bridge,
            system_theme,
            transport,
            api_url,
            clock,
            choices,
            main_button_text,
        } = deps;

        let shared = Rc::new(Shared {
            state: RefCell::new(ScreenState::default()),
            render_hook: RefCell::new(None),
            choices,
            bridge_present: bridge.is_present(),
        });

        Self {
            send_to_bot: SendToBot::new(bridge.clone(), clock.clone()),
            send_to_server: SendToServer::new(transport, clock, api_url),
            shared,
            bridge,
            system_theme,
            main_button_text,
            binding: RefCell::new(PrimaryActionBinding::new()),
            started: Cell::new(false),
        }
    }

    /// Initialize the bridge, read launch context and scheme, bind the
    /// primary action, then render once.
    pub fn start(&self) {
        self.bridge.initialize();

        let user = self.bridge.launch_user();
        let scheme = self
            .bridge
            .color_scheme(self.system_theme.as_ref(), self.theme_listener());

        {
            let mut state = self.shared.state.borrow_mut();
            state.user = user;
            state.scheme = scheme;
        }
        info!(
            bridge = self.bridge.is_present(),
            scheme = scheme.as_str(),
            "screen started"
        );

        self.started.set(true);
        if self.bridge.is_present() {
            // Failure is already on the status line.
            let _ = self.bind_primary_action();
        }
        self.shared.render();
    }

    pub fn set_render_hook(&self, hook: RenderHook) {
        *self.shared.render_hook.borrow_mut() = Some(hook);
    }

    pub fn view(&self) -> ScreenView {
        self.shared.view()
    }

    pub fn status(&self) -> StatusMessage {
        self.shared.state.borrow().status.clone()
    }

    pub fn form(&self) -> FormState {
        self.shared.form_snapshot()
    }

    pub fn scheme(&self) -> ColorScheme {
        self.shared.state.borrow().scheme
    }

    pub fn launch_user(&self) -> Option<LaunchUser> {
        self.shared.state.borrow().user.clone()
    }

    pub fn choices(&self) -> &ChoiceSet {
        &self.shared.choices
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.shared.state.borrow_mut().form.set_text(text);
        self.rebind_quietly();
        self.shared.render();
    }

    /// Select a glyph. Re-selecting the current one changes nothing.
    pub fn select(&self, glyph: &str) -> Result<(), FormError> {
        let changed = {
            let mut state = self.shared.state.borrow_mut();
            state.form.select(&self.shared.choices, glyph)
        };

        match changed {
            Ok(true) => {
                self.rebind_quietly();
                self.shared.render();
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(err) => {
                warn!(error = %err, "selection rejected");
                Err(err)
            }
        }
    }

    /// Select by zero-based position in the selector.
    pub fn select_index(&self, index: usize) -> Result<(), FormError> {
        let glyph = self
            .shared
            .choices
            .get(index)
            .map(|choice| choice.as_str().to_string())
            .ok_or_else(|| FormError::UnknownChoice(format!("#{index}")))?;
        self.select(&glyph)
    }

    /// Reset text, selection and status.
    pub fn clear(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            state.form.clear();
            state.status = StatusMessage::empty();
        }
        self.rebind_quietly();
        self.shared.render();
    }

    /// "sendData → бот": one-way relay of the current form.
    pub fn send_to_bot(&self) {
        let form = self.shared.form_snapshot();
        let result = self.send_to_bot.execute(&form, BotMessageKind::Quick);
        self.shared.report_bot_send(result);
    }

    /// What the host's primary button invokes: relay the current form as a
    /// `main_click` message.
    pub fn trigger_primary_action(&self) {
        let form = self.shared.form_snapshot();
        let result = self.send_to_bot.execute(&form, BotMessageKind::MainClick);
        self.shared.report_bot_send(result);
    }

    /// "POST → сервер". Shows the sending indicator, awaits the reply and
    /// overwrites the status with the outcome. Overlapping calls are not
    /// serialized: the last one to finish wins.
    pub async fn send_to_server(&self) {
        self.shared.set_status(StatusMessage::sending());

        let form = self.shared.form_snapshot();
        let init_data = self.bridge.init_data();
        let status = match self.send_to_server.execute(&form, init_data).await {
            Ok(reply) => StatusMessage::server_reply(&reply.summary()),
            Err(err) => StatusMessage::from_error(&err),
        };

        self.shared.set_status(status);
    }

    /// Bind the host's primary button to the current form.
    ///
    /// On failure (including no bridge) the status line reports it.
    pub fn bind_primary_action(&self) -> Result<(), MiniAppError> {
        let result = self.bind_current_form();
        if let Err(err) = &result {
            warn!(error = %err, "primary action bind failed");
            self.shared.set_status(StatusMessage::from_error(err));
        }
        result
    }

    /// Host theme push or system preference change. Form state is kept.
    pub fn apply_color_scheme(&self, scheme: ColorScheme) {
        self.shared.set_scheme(scheme);
    }

    /// Hide the primary button and detach its handler.
    pub fn teardown(&self) {
        self.started.set(false);
        self.bridge
            .unbind_primary_action(&mut self.binding.borrow_mut());
        info!("screen torn down");
    }

    fn bind_current_form(&self) -> Result<(), MiniAppError> {
        let handler = self.primary_handler();
        self.bridge.bind_primary_action(
            &mut self.binding.borrow_mut(),
            &self.main_button_text,
            handler,
        )
    }

    /// Rebind after a form change. Errors are logged only; the status line
    /// belongs to the user's last action.
    fn rebind_quietly(&self) {
        if !self.started.get() || !self.bridge.is_present() {
            return;
        }
        if let Err(err) = self.bind_current_form() {
            warn!(error = %err, "primary action rebind failed");
        }
    }

    /// Click handler capturing the form as it is now.
    fn primary_handler(&self) -> ActionHandler {
        let snapshot = self.shared.form_snapshot();
        let shared: Weak<Shared> = Rc::downgrade(&self.shared);
        let usecase = self.send_to_bot.clone();

        Rc::new(move || {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let result = usecase.execute(&snapshot, BotMessageKind::MainClick);
            shared.report_bot_send(result);
        })
    }

    fn theme_listener(&self) -> ThemeListener {
        let shared: Weak<Shared> = Rc::downgrade(&self.shared);
        Rc::new(move |scheme| {
            if let Some(shared) = shared.upgrade() {
                shared.set_scheme(scheme);
            }
        })
    }
}

impl Drop for MiniAppScreen {
    fn drop(&mut self) {
        if self.started.get() {
            self.teardown();
        }
    }
}
