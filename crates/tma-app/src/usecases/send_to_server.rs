//! Use case for posting the form to the configured backend
//! 向配置的后端提交表单的用例

use std::rc::Rc;

use tma_core::endpoint::command_url;
use tma_core::ports::{ClockPort, CommandTransportPort};
use tma_core::reply::classify_response;
use tma_core::{FormState, MiniAppError, OutboundPayload, ServerReply};
use tracing::{info, info_span, warn, Instrument};

/// Post the form to `{api_url}/api/command` and classify the reply.
///
/// ## Behavior / 行为
/// - Blank `api_url` → `ConfigMissing`, nothing is sent
/// - Transport failure → `Network`
/// - Non-2xx / non-JSON / malformed JSON → see `classify_response`
///
/// No timeout or cancellation is applied here; overlapping calls are
/// independent and whichever finishes last decides the status line.
#[derive(Clone)]
pub struct SendToServer {
    transport: Rc<dyn CommandTransportPort>,
    clock: Rc<dyn ClockPort>,
    api_url: String,
}

impl SendToServer {
    pub fn new(
        transport: Rc<dyn CommandTransportPort>,
        clock: Rc<dyn ClockPort>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            clock,
            api_url: api_url.into(),
        }
    }

    pub async fn execute(
        &self,
        form: &FormState,
        init_data: Option<String>,
    ) -> Result<ServerReply, MiniAppError> {
        let span = info_span!("usecase.send_to_server.execute");

        async {
            let url = command_url(&self.api_url).ok_or(MiniAppError::ConfigMissing)?;
            let payload = OutboundPayload::from_form(form, init_data, self.clock.now_ms());

            let raw = self.transport.post_command(&url, &payload).await?;
            let status = raw.status;

            match classify_response(raw) {
                Ok(reply) => {
                    info!(status, created_at_ms = payload.created_at_ms, "command accepted");
                    Ok(reply)
                }
                Err(err) => {
                    warn!(status, error = %err, "command rejected");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
