//! Shared CLI output helpers for consistent operator-facing text.
//!
//! Status lines carry a coloured symbol, field labels are dimmed and
//! section titles bold. JSON documents go to stdout unstyled.

use std::fmt::Display;

use owo_colors::OwoColorize;

/// Print a section header.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!("  {:<22} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!("  {} {}", "×".red(), message);
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Print a JSON document on one line.
pub fn json(value: &serde_json::Value) {
    println!("{value}");
}
