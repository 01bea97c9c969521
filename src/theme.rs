//! Plain text theme - no colors, no emojis
//! Simple, clean text-only output

/// Plain text formatting utilities
pub struct Theme;

impl Theme {
    /// Plain text (no styling)
    pub fn primary(text: &str) -> String {
        text.to_string()
    }

    /// Plain text (no styling)
    pub fn success(text: &str) -> String {
        text.to_string()
    }

    /// Plain text (no styling)
    pub fn warning(text: &str) -> String {
        text.to_string()
    }

    /// Plain text (no styling)
    pub fn muted(text: &str) -> String {
        text.to_string()
    }

    /// Plain text (no styling)
    pub fn value(text: &str) -> String {
        text.to_string()
    }

    /// Plain text (no styling)
    pub fn header(text: &str) -> String {
        text.to_string()
    }

    /// Plain text (no styling)
    pub fn error(text: &str) -> String {
        text.to_string()
    }

    /// Plain divider line
    pub fn divider(width: usize) -> String {
        "-".repeat(width)
    }

    /// Plain double divider
    pub fn divider_bold(width: usize) -> String {
        "=".repeat(width)
    }
}
