//! Outbound payloads, built fresh for every send and never mutated.

use serde::{Deserialize, Serialize};

use crate::form::FormState;

/// Action tag the backend dispatches on.
pub const ACTION_DO_SOMETHING: &str = "do_something";

/// Largest payload the host's one-way channel accepts, in bytes.
pub const MAX_SEND_DATA_BYTES: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPayload {
    pub text: String,
    pub selected: Option<String>,
}

impl From<&FormState> for FormPayload {
    fn from(form: &FormState) -> Self {
        Self {
            text: form.text.clone(),
            selected: form.selected.as_ref().map(|c| c.as_str().to_string()),
        }
    }
}

/// Body of `POST {base}/api/command`.
///
/// `created_at_ms` is local bookkeeping for logs and is not part of the
/// wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundPayload {
    pub action: String,
    pub payload: FormPayload,
    #[serde(rename = "initData")]
    pub init_data: Option<String>,
    #[serde(skip)]
    pub created_at_ms: i64,
}

impl OutboundPayload {
    pub fn from_form(form: &FormState, init_data: Option<String>, now_ms: i64) -> Self {
        Self {
            action: ACTION_DO_SOMETHING.to_string(),
            payload: FormPayload::from(form),
            init_data: init_data.filter(|data| !data.is_empty()),
            created_at_ms: now_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotMessageKind {
    /// Sent by the host-rendered primary action button
    MainClick,
    /// Sent by the in-page "send to bot" button
    Quick,
}

/// Message relayed to the bot through the one-way channel.
///
/// Arrives on the bot side as `message.web_app_data.data`. Bot handlers
/// read the selection of a `quick` message from `payload` (null when nothing
/// is picked); `main_click` carries no `payload` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotMessage {
    #[serde(rename = "type")]
    pub kind: BotMessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Option<String>>,
    pub text: String,
    pub selected: Option<String>,
    pub ts: i64,
}

impl BotMessage {
    pub fn main_click(form: &FormState, now_ms: i64) -> Self {
        Self::build(BotMessageKind::MainClick, form, now_ms)
    }

    pub fn quick(form: &FormState, now_ms: i64) -> Self {
        Self::build(BotMessageKind::Quick, form, now_ms)
    }

    fn build(kind: BotMessageKind, form: &FormState, now_ms: i64) -> Self {
        let FormPayload { text, selected } = FormPayload::from(form);
        let payload = match kind {
            BotMessageKind::Quick => Some(selected.clone()),
            BotMessageKind::MainClick => None,
        };
        Self {
            kind,
            payload,
            text,
            selected,
            ts: now_ms,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{ChoiceSet, DEFAULT_CHOICES};
    use proptest::prelude::*;
    use serde_json::json;

    fn filled_form(text: &str, glyph: Option<&str>) -> FormState {
        let mut form = FormState::new();
        form.set_text(text);
        if let Some(glyph) = glyph {
            form.select(&ChoiceSet::default(), glyph).unwrap();
        }
        form
    }

    #[test]
    fn outbound_payload_matches_backend_contract() {
        let form = filled_form("привет", Some("🍌"));
        let payload =
            OutboundPayload::from_form(&form, Some("query_id=1".into()), 1_700_000_000_000);

        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "action": "do_something",
                "payload": { "text": "привет", "selected": "🍌" },
                "initData": "query_id=1"
            })
        );
    }

    #[test]
    fn empty_init_data_is_sent_as_null() {
        let payload = OutboundPayload::from_form(&FormState::new(), Some(String::new()), 0);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["initData"], serde_json::Value::Null);
        assert_eq!(value["payload"]["selected"], serde_json::Value::Null);
    }

    fn form_text() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<String>(),
            r#"["\\\x00-\x1f а-я😀𝄞]{0,32}"#,
        ]
    }

    proptest! {
        #[test]
        fn outbound_payload_survives_serialization(
            text in form_text(),
            index in proptest::option::of(0..DEFAULT_CHOICES.len()),
        ) {
            let glyph = index.map(|index| DEFAULT_CHOICES[index]);
            let payload = OutboundPayload::from_form(&filled_form(&text, glyph), None, 5);

            let wire = serde_json::to_string(&payload).unwrap();
            let back: OutboundPayload = serde_json::from_str(&wire).unwrap();

            prop_assert_eq!(&back.payload.text, &text);
            prop_assert_eq!(back.payload.selected.as_deref(), glyph);
        }
    }

    #[test]
    fn bot_message_is_tagged_by_kind() {
        let form = filled_form("hi", Some("🍇"));

        let json = BotMessage::main_click(&form, 7).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            json!({ "type": "main_click", "text": "hi", "selected": "🍇", "ts": 7 })
        );
        assert_eq!(BotMessage::quick(&form, 7).kind, BotMessageKind::Quick);
    }

    #[test]
    fn quick_message_carries_selection_in_payload() {
        let json = BotMessage::quick(&filled_form("hi", Some("🍎")), 1)
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "quick");
        assert_eq!(value["payload"], "🍎");
        assert_eq!(value["text"], "hi");
        assert_eq!(value["ts"], 1);
    }

    #[test]
    fn quick_message_without_selection_sends_null_payload() {
        let json = BotMessage::quick(&filled_form("", None), 1).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let object = value.as_object().unwrap();
        assert!(object.contains_key("payload"));
        assert_eq!(value["payload"], serde_json::Value::Null);
    }
}
