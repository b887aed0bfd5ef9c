//! Render-ready snapshot of the screen.
//!
//! Hosts (browser DOM, native console) draw from a [`ScreenView`] only; they
//! never read screen state directly.

use std::fmt::Write as _;

use tma_core::{ChoiceSet, ColorScheme, FormState, LaunchUser, StatusMessage};

pub const TITLE: &str = "Тестовый интерфейс Mini App";
pub const PLACEHOLDER: &str = "введите текст...";
pub const OUTSIDE_HOST_GREETING: &str = "Открыто вне Telegram";
pub const CLEAR_LABEL: &str = "Очистить";
pub const SEND_TO_BOT_LABEL: &str = "sendData → бот";
pub const SEND_TO_SERVER_LABEL: &str = "POST → сервер";
pub const STATUS_LABEL: &str = "Статус:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub glyph: String,
    pub selected: bool,
    /// Tooltip / accessible label
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub title: &'static str,
    pub greeting: String,
    pub scheme: ColorScheme,
    pub text: String,
    pub placeholder: &'static str,
    pub choices: Vec<ChoiceView>,
    pub status: String,
    pub bridge_present: bool,
}

impl ScreenView {
    pub(crate) fn build(
        user: Option<&LaunchUser>,
        scheme: ColorScheme,
        form: &FormState,
        choices: &ChoiceSet,
        status: &StatusMessage,
        bridge_present: bool,
    ) -> Self {
        let greeting = match user {
            Some(user) => format!("Привет, {}", user.display_name()),
            None => OUTSIDE_HOST_GREETING.to_string(),
        };

        let choices = choices
            .iter()
            .map(|choice| ChoiceView {
                glyph: choice.as_str().to_string(),
                selected: form.is_selected(choice.as_str()),
                title: format!("Выбрать {choice}"),
            })
            .collect();

        Self {
            title: TITLE,
            greeting,
            scheme,
            text: form.text.clone(),
            placeholder: PLACEHOLDER,
            choices,
            status: status.as_str().to_string(),
            bridge_present,
        }
    }

    pub fn selected_glyph(&self) -> Option<&str> {
        self.choices
            .iter()
            .find(|choice| choice.selected)
            .map(|choice| choice.glyph.as_str())
    }

    /// Plain-text rendering used by the console host.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} == [{}]", self.title, self.scheme.as_str());
        let _ = writeln!(out, "{}", self.greeting);

        if self.text.is_empty() {
            let _ = writeln!(out, "> ({})", self.placeholder);
        } else {
            let _ = writeln!(out, "> {}", self.text);
        }

        let row: Vec<String> = self
            .choices
            .iter()
            .enumerate()
            .map(|(index, choice)| {
                if choice.selected {
                    format!("{}:[{}]", index + 1, choice.glyph)
                } else {
                    format!("{}: {} ", index + 1, choice.glyph)
                }
            })
            .collect();
        let _ = writeln!(out, "{}", row.join(" "));

        let _ = writeln!(
            out,
            "[{CLEAR_LABEL}] [{SEND_TO_BOT_LABEL}] [{SEND_TO_SERVER_LABEL}]"
        );
        let _ = write!(out, "{STATUS_LABEL} {}", self.status);
        out
    }
}
