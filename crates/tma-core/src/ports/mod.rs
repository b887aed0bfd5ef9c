//! Port interfaces for the application layer
//!
//! Ports define the contract between the screen logic (use cases) and the
//! host or infrastructure implementations. The screen never reads ambient
//! globals; every host capability arrives through one of these traits.
//!
//! The screen runs on a single event loop (the browser's), so ports are not
//! required to be `Send`/`Sync` and async ports use `?Send` futures.

mod bridge;
mod clock;
mod theme;
mod transport;

pub use bridge::{ActionHandler, BridgeDetectorPort, HandlerId, HostBridgePort, ThemeListener};
pub use clock::ClockPort;
pub use theme::SystemThemePort;
pub use transport::CommandTransportPort;
