//! HTTP delivery of command payloads via `reqwest`.
//!
//! The adapter only reports what happened on the wire. Deciding whether a
//! response is a success, a server error or an unexpected page is done by
//! `tma_core::reply::classify_response`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tma_core::endpoint::{CLIENT_MARKER_HEADER, CLIENT_MARKER_VALUE};
use tma_core::ports::CommandTransportPort;
use tma_core::{OutboundPayload, RawResponse, TransportError};
use tracing::{debug, info_span, Instrument};

pub struct ReqwestCommandTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl Default for ReqwestCommandTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestCommandTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    /// Like [`new`](Self::new), but reports client construction failure
    /// (TLS backend initialization) instead of panicking.
    pub fn try_new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(Self {
            client,
            timeout: None,
        })
    }

    /// Per-request timeout. Only honored on native builds; the browser's
    /// fetch has no client-side timeout here.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait(?Send)]
impl CommandTransportPort for ReqwestCommandTransport {
    async fn post_command(
        &self,
        url: &str,
        payload: &OutboundPayload,
    ) -> Result<RawResponse, TransportError> {
        let span = info_span!("infra.http.post_command", url = %url);

        async {
            #[allow(unused_mut)]
            let mut request = self
                .client
                .post(url)
                .header(CLIENT_MARKER_HEADER, CLIENT_MARKER_VALUE)
                .json(payload);

            #[cfg(not(target_arch = "wasm32"))]
            if let Some(timeout) = self.timeout {
                request = request.timeout(timeout);
            }

            let response = request
                .send()
                .await
                .map_err(|err| TransportError(err.to_string()))?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.text().await.map_err(|err| err.to_string());

            debug!(
                status = status.as_u16(),
                content_type = content_type.as_deref().unwrap_or(""),
                body_ok = body.is_ok(),
                "response received"
            );

            Ok(RawResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                content_type,
                body,
            })
        }
        .instrument(span)
        .await
    }
}
