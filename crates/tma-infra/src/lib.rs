pub mod http;
pub mod time;

pub use http::ReqwestCommandTransport;
pub use time::SystemClock;
