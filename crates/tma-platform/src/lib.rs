//! # tma-platform
//!
//! Host-environment implementations for the Mini App harness.
//!
//! - **bridge**: bridge detectors and the in-memory [`RecordingBridge`]
//! - **telegram**: adapter over `window.Telegram.WebApp` (wasm32 only)
//! - **theme**: system light/dark preference

pub mod bridge;
#[cfg(target_arch = "wasm32")]
pub mod telegram;
pub mod theme;

pub use bridge::{FixedDetector, NoBridgeDetector, RecordingBridge};
