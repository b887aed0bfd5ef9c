use thiserror::Error;

/// Failures surfaced by the screen's outbound actions.
///
/// Every variant is caught where it occurs and turned into a
/// [`StatusMessage`](crate::StatusMessage); none of them ends the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MiniAppError {
    /// No host bridge; the screen runs in browser mode.
    #[error("host bridge unavailable")]
    BridgeUnavailable,

    /// The bridge's one-way channel rejected or threw on send.
    #[error("bridge send failed: {0}")]
    BridgeSend(String),

    /// No backend base URL configured.
    #[error("backend url not configured")]
    ConfigMissing,

    /// Transport failure, or a JSON body that could not be parsed.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response.
    #[error("server error: {status} {status_text}")]
    Server {
        status: u16,
        status_text: String,
        /// Body prefix, or a placeholder when the body could not be read
        body: String,
    },

    /// 2xx response that is not JSON.
    #[error("unexpected content type: {content_type}")]
    UnexpectedContentType {
        content_type: String,
        /// Body prefix
        body: String,
    },
}

/// Errors reported by a [`HostBridgePort`](crate::ports::HostBridgePort).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("bridge not present")]
    Unavailable,

    #[error("bridge call `{operation}` failed: {message}")]
    Call {
        operation: &'static str,
        message: String,
    },
}

impl BridgeError {
    pub fn call(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Call {
            operation,
            message: message.into(),
        }
    }
}

impl From<BridgeError> for MiniAppError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Unavailable => MiniAppError::BridgeUnavailable,
            BridgeError::Call { message, .. } => MiniAppError::BridgeSend(message),
        }
    }
}

/// Transport-level failure: the request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for MiniAppError {
    fn from(err: TransportError) -> Self {
        MiniAppError::Network(err.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("choice `{0}` is not part of the selector")]
    UnknownChoice(String),
}
