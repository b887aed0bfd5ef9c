//! Backend endpoint addressing.

/// Path of the command endpoint relative to the configured base URL.
pub const COMMAND_PATH: &str = "/api/command";

/// Header marking requests as coming from the mini-app client.
pub const CLIENT_MARKER_HEADER: &str = "X-Requested-With";
pub const CLIENT_MARKER_VALUE: &str = "TelegramWebApp";

/// Build the command URL from a configured base.
///
/// Returns `None` when the base is empty or whitespace, which callers
/// report as a missing configuration. Trailing slashes are stripped.
pub fn command_url(base: &str) -> Option<String> {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("{trimmed}{COMMAND_PATH}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes() {
        assert_eq!(
            command_url("https://example.org/").as_deref(),
            Some("https://example.org/api/command")
        );
        assert_eq!(
            command_url("https://example.org//").as_deref(),
            Some("https://example.org/api/command")
        );
    }

    #[test]
    fn keeps_base_path_segments() {
        assert_eq!(
            command_url("http://127.0.0.1:8080/bot").as_deref(),
            Some("http://127.0.0.1:8080/bot/api/command")
        );
    }

    #[test]
    fn blank_base_is_missing() {
        assert_eq!(command_url(""), None);
        assert_eq!(command_url("   "), None);
        assert_eq!(command_url("/"), None);
    }
}
