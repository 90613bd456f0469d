//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting.
/// Status lines go to stderr, results to stdout.
pub struct Presenter;

impl Presenter {
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// One-line summary of a delivered posting
    pub fn format_delivery(&self, kind: &str, app_name: &str, transport: &str) -> String {
        format!("{} for {} posted via {}", kind, app_name.bold(), transport)
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
