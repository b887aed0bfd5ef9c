pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config};
pub use run::run;
pub use wiring::{build_screen, ScreenHandle, WiringError};
