//! Native preview of the Mini App screen.
//!
//! Reads `miniapp.toml` and `MINIAPP_API_URL`, then drives the screen from
//! stdin. Set `[bridge] emulate = true` to exercise the bot channel and the
//! primary action against an in-memory host.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    miniapp_harness_lib::run().await
}

// The browser build starts from `miniapp_harness_lib::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
