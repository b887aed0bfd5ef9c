use async_trait::async_trait;

use crate::error::TransportError;
use crate::payload::OutboundPayload;
use crate::reply::RawResponse;

/// Delivers a command payload to the backend.
///
/// Implementations report only what they observed; classification happens
/// in [`classify_response`](crate::reply::classify_response). An `Err` means
/// no response was received at all.
#[async_trait(?Send)]
pub trait CommandTransportPort {
    async fn post_command(
        &self,
        url: &str,
        payload: &OutboundPayload,
    ) -> Result<RawResponse, TransportError>;
}
