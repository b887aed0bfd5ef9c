mod detect;
mod recording;

pub use detect::{FixedDetector, NoBridgeDetector};
pub use recording::{ops, RecordingBridge};
