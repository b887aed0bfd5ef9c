use std::rc::Rc;

use tma_core::ports::ClockPort;
use tma_core::{BotMessage, BotMessageKind, FormState, MiniAppError};

use crate::bridge_adapter::BridgeAdapter;

/// Relay the form to the bot over the bridge's one-way channel.
#[derive(Clone)]
pub struct SendToBot {
    bridge: BridgeAdapter,
    clock: Rc<dyn ClockPort>,
}

impl SendToBot {
    pub fn new(bridge: BridgeAdapter, clock: Rc<dyn ClockPort>) -> Self {
        Self { bridge, clock }
    }

    pub fn execute(&self, form: &FormState, kind: BotMessageKind) -> Result<(), MiniAppError> {
        let now_ms = self.clock.now_ms();
        let message = match kind {
            BotMessageKind::MainClick => BotMessage::main_click(form, now_ms),
            BotMessageKind::Quick => BotMessage::quick(form, now_ms),
        };

        match self.bridge.send_one_way(&message) {
            Ok(()) => {
                tracing::info!(kind = ?kind, "payload handed to bridge");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(kind = ?kind, error = %err, "one-way send failed");
                Err(err)
            }
        }
    }
}
