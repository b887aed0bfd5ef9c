//! Classification of backend responses.
//!
//! Order matters: non-2xx first, then content type. A 2xx HTML error page
//! must degrade to a diagnostic, never to a JSON parse crash.

use serde_json::Value;

use crate::error::MiniAppError;

/// How many characters of a body are echoed back in diagnostics.
pub const BODY_PREFIX_CHARS: usize = 200;

/// Placeholder used when the response body could not be read.
pub const UNREADABLE_BODY: &str = "<тело ответа недоступно>";

/// What the transport observed, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    /// Body text, or the read error message
    pub body: Result<String, String>,
}

/// A successful JSON reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerReply {
    pub json: Value,
}

impl ServerReply {
    /// Text shown to the user: the server's `message` when it is a
    /// non-empty string, otherwise the whole JSON document.
    pub fn summary(&self) -> String {
        match self.json.get("message").and_then(Value::as_str) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => self.json.to_string(),
        }
    }
}

pub fn classify_response(raw: RawResponse) -> Result<ServerReply, MiniAppError> {
    if !(200..300).contains(&raw.status) {
        let body = match raw.body {
            Ok(text) => prefix_chars(&text, BODY_PREFIX_CHARS),
            Err(_) => UNREADABLE_BODY.to_string(),
        };
        return Err(MiniAppError::Server {
            status: raw.status,
            status_text: raw.status_text,
            body,
        });
    }

    let content_type = raw.content_type.unwrap_or_default();
    let body = raw.body.map_err(MiniAppError::Network)?;

    if !content_type.to_ascii_lowercase().contains("application/json") {
        return Err(MiniAppError::UnexpectedContentType {
            content_type,
            body: prefix_chars(&body, BODY_PREFIX_CHARS),
        });
    }

    serde_json::from_str::<Value>(&body)
        .map(|json| ServerReply { json })
        .map_err(|err| MiniAppError::Network(err.to_string()))
}

/// First `max` characters of `text`, on a char boundary.
pub fn prefix_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, content_type: Option<&str>, body: &str) -> RawResponse {
        RawResponse {
            status,
            status_text: String::new(),
            content_type: content_type.map(str::to_string),
            body: Ok(body.to_string()),
        }
    }

    #[test]
    fn non_2xx_wins_over_json_content_type() {
        let err = classify_response(RawResponse {
            status_text: "Internal Server Error".into(),
            ..raw(500, Some("application/json"), "oops")
        })
        .unwrap_err();

        assert_eq!(
            err,
            MiniAppError::Server {
                status: 500,
                status_text: "Internal Server Error".into(),
                body: "oops".into(),
            }
        );
    }

    #[test]
    fn unreadable_error_body_becomes_placeholder() {
        let err = classify_response(RawResponse {
            body: Err("connection reset".into()),
            ..raw(502, None, "")
        })
        .unwrap_err();

        match err {
            MiniAppError::Server { body, .. } => assert_eq!(body, UNREADABLE_BODY),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn html_on_2xx_is_unexpected_content_type() {
        let err = classify_response(raw(200, Some("text/html; charset=utf-8"), "<html>err</html>"))
            .unwrap_err();

        assert_eq!(
            err,
            MiniAppError::UnexpectedContentType {
                content_type: "text/html; charset=utf-8".into(),
                body: "<html>err</html>".into(),
            }
        );
    }

    #[test]
    fn long_bodies_are_cut_to_200_chars() {
        let body = "я".repeat(500);
        let err = classify_response(raw(200, Some("text/plain"), &body)).unwrap_err();

        match err {
            MiniAppError::UnexpectedContentType { body, .. } => {
                assert_eq!(body.chars().count(), BODY_PREFIX_CHARS)
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn json_reply_prefers_message_field() {
        let reply = classify_response(raw(200, Some("application/json"), r#"{"message":"ok"}"#))
            .unwrap();
        assert_eq!(reply.summary(), "ok");

        let reply = classify_response(raw(201, Some("Application/JSON"), r#"{"id":3}"#)).unwrap();
        assert_eq!(reply.summary(), r#"{"id":3}"#);
    }

    #[test]
    fn malformed_json_is_a_network_parse_error() {
        let err = classify_response(raw(200, Some("application/json"), "{not json")).unwrap_err();
        assert!(matches!(err, MiniAppError::Network(_)));
    }
}
