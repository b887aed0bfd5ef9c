//! Outbound actions triggered from the screen.
//!
//! Each use case returns a typed outcome; the screen turns it into the
//! status line. Nothing here touches screen state.

pub mod send_to_bot;
pub mod send_to_server;

pub use send_to_bot::SendToBot;
pub use send_to_server::SendToServer;
