//! User-facing console lines. Diagnostics go through the `log` facade instead.

use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

const HEADER_RULE: usize = 60;

fn icon(colour: Colour, icon: &str) -> String {
    Style::new().bold().fg(colour).paint(icon).to_string()
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Blue, ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Green, ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!(
        "{} {}",
        icon(Colour::Yellow, ICON_WARN),
        Colour::Yellow.paint(msg.to_string())
    );
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!(
        "{} {}",
        icon(Colour::Red, ICON_ERR),
        Colour::Red.paint(msg.to_string())
    );
}

/// Section header framed by rules.
pub fn header<T: fmt::Display>(msg: T) {
    let rule = "=".repeat(HEADER_RULE);
    let bold = Style::new().bold().fg(Colour::Blue);
    println!(
        "\n{}\n{}\n{}",
        bold.paint(rule.as_str()),
        bold.paint(msg.to_string()),
        bold.paint(rule.as_str())
    );
}
