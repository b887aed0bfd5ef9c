//! Human-readable status line.
//!
//! The line is overwritten after every action, never appended to. Wording
//! follows the screen's Russian UI.

use crate::error::MiniAppError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMessage(String);

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn sending() -> Self {
        Self::new("Отправка...")
    }

    pub fn sent_to_bot() -> Self {
        Self::new("Данные отправлены боту")
    }

    pub fn server_reply(summary: &str) -> Self {
        Self::new(format!("Ответ сервера: {summary}"))
    }

    pub fn from_error(err: &MiniAppError) -> Self {
        let text = match err {
            MiniAppError::BridgeUnavailable => {
                "Telegram WebApp недоступен: откройте Mini App из Telegram".to_string()
            }
            MiniAppError::BridgeSend(message) => format!("Ошибка отправки боту: {message}"),
            MiniAppError::ConfigMissing => {
                "Адрес сервера не настроен (MINIAPP_API_URL)".to_string()
            }
            MiniAppError::Network(message) => format!("Ошибка сети/парсинга: {message}"),
            MiniAppError::Server {
                status,
                status_text,
                body,
            } => format!("Ошибка сервера: {status} {status_text}. Ответ: {body}"),
            MiniAppError::UnexpectedContentType { content_type, body } => {
                let content_type = if content_type.is_empty() {
                    "без content-type"
                } else {
                    content_type.as_str()
                };
                format!("Сервер вернул не JSON ({content_type}): {body}")
            }
        };
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_mentions_code_and_body() {
        let status = StatusMessage::from_error(&MiniAppError::Server {
            status: 500,
            status_text: "Internal Server Error".into(),
            body: "oops".into(),
        });

        assert!(status.as_str().contains("500"));
        assert!(status.as_str().contains("Internal Server Error"));
        assert!(status.as_str().contains("oops"));
    }

    #[test]
    fn network_error_uses_network_prefix() {
        let status = StatusMessage::from_error(&MiniAppError::Network("refused".into()));
        assert_eq!(status.as_str(), "Ошибка сети/парсинга: refused");
    }

    #[test]
    fn non_json_reply_signals_content_type() {
        let status = StatusMessage::from_error(&MiniAppError::UnexpectedContentType {
            content_type: String::new(),
            body: "plain".into(),
        });
        assert_eq!(status.as_str(), "Сервер вернул не JSON (без content-type): plain");
    }
}
