//! Terminal output styling for tfimport
//!
//! Progress goes to stdout in pastel colors; diagnostics go through `tracing` on stderr.

use owo_colors::{OwoColorize, Rgb};

const MINT: Rgb = Rgb(152, 225, 152);
const CREAM: Rgb = Rgb(255, 230, 160);
const SKY: Rgb = Rgb(160, 200, 255);
const LAVENDER: Rgb = Rgb(181, 174, 254);
const TEAL: Rgb = Rgb(120, 180, 195);
const GREY: Rgb = Rgb(160, 160, 160);

/// A status line: a bold colored symbol, then the message
fn marked(symbol: &str, color: Rgb, message: &str) -> String {
    format!("{} {}", symbol.color(color).bold(), message.bright_white())
}

/// A heading followed by a grey rule on the next line
fn heading(title: impl std::fmt::Display, rule: &str, width: usize) -> String {
    format!("\n{}\n{}", title, rule.repeat(width).color(GREY))
}

fn pair(key: &str, value: impl std::fmt::Display) -> String {
    format!("  {} {}", format!("{}:", key).color(GREY), value)
}

pub fn success(message: &str) {
    println!("{}", marked("✓", MINT, message));
}

pub fn warning(message: &str) {
    println!("{}", marked("⚠", CREAM, message));
}

pub fn info(message: &str) {
    println!("{}", marked("ℹ", SKY, message));
}

/// Print a top-level heading, e.g. "Import Plan"
pub fn section(title: &str) {
    println!("{}", heading(title.color(LAVENDER).bold(), "─", 50));
}

/// Print a per-type heading with a lighter dotted rule
pub fn subsection(title: &str) {
    println!("{}", heading(title.color(TEAL), "·", 30));
}

pub fn key_value(key: &str, value: &str) {
    println!("{}", pair(key, value.bright_white()));
}

/// Like `key_value`, with the value in bold teal
pub fn key_value_highlight(key: &str, value: &str) {
    println!("{}", pair(key, value.color(TEAL).bold()));
}

/// Print rendered HCL and other secondary text in grey
pub fn dimmed(message: &str) {
    println!("{}", message.color(GREY));
}

pub fn blank() {
    println!();
}
