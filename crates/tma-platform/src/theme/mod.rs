//! System light/dark preference.

use tma_core::ports::SystemThemePort;
use tma_core::ColorScheme;

/// Fixed preference, for hosts that cannot be queried.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSystemTheme(pub ColorScheme);

impl SystemThemePort for FixedSystemTheme {
    fn preferred_scheme(&self) -> ColorScheme {
        self.0
    }
}

/// Reads `prefers-color-scheme` from the browser.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaQuerySystemTheme;

#[cfg(target_arch = "wasm32")]
impl SystemThemePort for MediaQuerySystemTheme {
    fn preferred_scheme(&self) -> ColorScheme {
        let prefers_dark = web_sys::window()
            .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map(|query| query.matches())
            .unwrap_or(false);
        if prefers_dark {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}
