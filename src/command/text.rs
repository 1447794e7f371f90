//! Chat text helpers.

/// Color of command names in `help` output.
pub const HELP_COLOR: &str = "#6FF";

/// Color of command names in `usage` output.
pub const USAGE_COLOR: &str = "#6F3";

/// Wrap text in a client color escape, resetting to white afterwards.
///
/// Purely cosmetic; clients without color support show the text as is.
pub fn colorize(text: &str, color: &str) -> String {
    format!("\u{1b}(c@{}){}\u{1b}(c@#FFF)", color, text)
}

/// Join tokens for display.
pub(crate) fn list(items: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
