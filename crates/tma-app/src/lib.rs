//! Mini App screen orchestration layer
//!
//! This crate holds the screen component and the use cases it triggers.
//! Host and network access arrive through `tma_core::ports`.

pub mod bridge_adapter;
pub mod cosmetic;
pub mod deps;
pub mod primary_action;
pub mod screen;
pub mod usecases;
pub mod view;

pub use bridge_adapter::BridgeAdapter;
pub use deps::ScreenDeps;
pub use screen::{MiniAppScreen, RenderHook};
pub use view::ScreenView;
