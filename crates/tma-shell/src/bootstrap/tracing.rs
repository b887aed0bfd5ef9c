//! Tracing configuration for the Mini App harness
//!
//! ## Architecture / 架构
//!
//! - **Native preview**: fmt layer to stdout, UTC timestamps, file and line
//! - **Browser (wasm32)**: fmt layer without timer or ANSI, each event is
//!   forwarded as one line to the browser console
//! - **Environment-aware**: `RUST_LOG` wins over the built-in directives
//!   (native only; the browser has no process environment)

use tracing_subscriber::{fmt, prelude::*, registry};

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for the harness crates
/// - **Production**: info level for the harness crates
/// - **HTTP stack**: connection pool and TLS chatter kept at warn
pub fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    let mut directives = vec![
        level.to_string(),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "rustls=warn".to_string(), // handshake details
        "reqwest=info".to_string(),
    ];
    directives.extend(
        ["tma_core", "tma_app", "tma_infra", "tma_platform", "tma_shell"]
            .iter()
            .map(|krate| format!("{krate}={level}")),
    );
    directives
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    let directives = build_filter_directives(is_development()).join(",");

    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives))
    }

    #[cfg(target_arch = "wasm32")]
    {
        tracing_subscriber::EnvFilter::new(directives)
    }
}

/// Initialize the tracing subscriber with appropriate configuration
///
/// Call once, before the screen is wired:
///
/// ```ignore
/// tma_shell::bootstrap::tracing::init_tracing_subscriber()?;
/// let config = tma_shell::bootstrap::resolve_config()?;
/// ```
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(std::io::stdout);

    registry().with(env_filter()).with(stdout_layer).try_init()?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let console_layer = fmt::layer()
        .without_time()
        .with_level(true)
        .with_target(true)
        .with_ansi(false)
        .with_writer(console::ConsoleMakeWriter);

    registry().with(env_filter()).with(console_layer).try_init()?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    /// Buffers one formatted event and logs it on drop.
    pub struct ConsoleWriter {
        buffer: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let text = String::from_utf8_lossy(&self.buffer);
            let line = text.trim_end();
            if !line.is_empty() {
                web_sys::console::log_1(&JsValue::from_str(line));
            }
        }
    }

    pub struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter { buffer: Vec::new() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert_eq!(dev_directives[0], "debug");
        assert!(dev_directives.contains(&"tma_app=debug".to_string()));
        assert!(dev_directives.contains(&"hyper=warn".to_string()));

        let prod_directives = build_filter_directives(false);
        assert_eq!(prod_directives[0], "info");
        assert!(prod_directives.contains(&"tma_infra=info".to_string()));
    }

    #[test]
    fn test_directives_parse_as_env_filter() {
        let joined = build_filter_directives(is_development()).join(",");
        assert!(tracing_subscriber::EnvFilter::try_new(joined).is_ok());
    }
}
