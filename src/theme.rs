//! Console styling helpers
//!
//! Thin wrappers over `colored` so the rest of the crate never styles text
//! inline. Respects `NO_COLOR` through the crate's built-in handling.

use colored::Colorize;

pub struct Theme;

impl Theme {
    /// Section heading
    pub fn header(text: &str) -> String {
        text.bold().to_string()
    }

    /// Primary text, used for labels and column headers
    pub fn primary(text: &str) -> String {
        text.bold().to_string()
    }

    /// Secondary/dimmed text
    pub fn muted(text: &str) -> String {
        text.dimmed().to_string()
    }

    /// A command the user can type
    pub fn command(text: &str) -> String {
        text.cyan().to_string()
    }

    /// Success marker
    pub fn success(text: &str) -> String {
        text.green().bold().to_string()
    }

    /// Error marker
    pub fn error(text: &str) -> String {
        text.red().bold().to_string()
    }

    /// Warning marker
    pub fn warning(text: &str) -> String {
        text.yellow().bold().to_string()
    }

    /// Thin horizontal rule
    pub fn divider(width: usize) -> String {
        "─".repeat(width).dimmed().to_string()
    }

    /// Heavy horizontal rule
    pub fn divider_bold(width: usize) -> String {
        "═".repeat(width).to_string()
    }
}
