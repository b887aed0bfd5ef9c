use tma_core::ports::ClockPort;

/// Wall clock. Uses `chrono` so the same code runs in the browser build.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
