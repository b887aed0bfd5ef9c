//! # tma-shell
//!
//! Bootstrap and hosting for the Mini App harness: configuration, tracing,
//! dependency wiring, and the two hosts that draw the screen.
//!
//! - **bootstrap**: config loading, tracing subscriber, wiring, entry point
//! - **console**: native preview host (stdin/stdout)
//! - **web**: browser host (wasm32 only)

pub mod bootstrap;
#[cfg(not(target_arch = "wasm32"))]
pub mod console;
#[cfg(target_arch = "wasm32")]
pub mod web;
