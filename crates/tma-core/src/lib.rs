//! # tma-core
//!
//! Core domain models and port contracts for the Mini App harness.
//!
//! This crate contains pure data and rules without any infrastructure
//! dependencies. Everything that talks to the host bridge, the network or
//! the clock is reached through a trait in [`ports`].

// Public module exports
pub mod choice;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod launch;
pub mod payload;
pub mod ports;
pub mod reply;
pub mod status;

// Re-export commonly used types at the crate root
pub use choice::{Choice, ChoiceSet};
pub use config::AppConfig;
pub use error::{BridgeError, FormError, MiniAppError, TransportError};
pub use form::FormState;
pub use launch::{ColorScheme, LaunchUser};
pub use payload::{BotMessage, BotMessageKind, FormPayload, OutboundPayload};
pub use reply::{RawResponse, ServerReply};
pub use status::StatusMessage;
