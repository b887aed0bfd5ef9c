//! Process entry: tracing, config, wiring, then hand over to the host.

use anyhow::Context;

use super::config::resolve_config;
use super::tracing::init_tracing_subscriber;
use super::wiring::build_screen;

/// Run the native preview on stdin/stdout until `quit` or end of input.
#[cfg(not(target_arch = "wasm32"))]
pub async fn run() -> anyhow::Result<()> {
    init_tracing_subscriber().context("Failed to initialize tracing")?;
    let config = resolve_config()?;
    let handle = build_screen(&config)?;

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    crate::console::run_console(&handle, input, &mut output).await
}

/// Mount the screen into the current page.
#[cfg(target_arch = "wasm32")]
pub fn run() -> anyhow::Result<()> {
    console_error_panic_hook::set_once();
    init_tracing_subscriber().context("Failed to initialize tracing")?;
    let config = resolve_config()?;
    let handle = build_screen(&config)?;

    crate::web::mount(handle.screen)
}
