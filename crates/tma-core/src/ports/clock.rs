pub trait ClockPort {
    fn now_ms(&self) -> i64;
}
