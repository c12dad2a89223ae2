// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for help and status output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use rp_core::AllocationStatus;

/// ANSI 256-color codes
pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Default values/context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Under-allocated: amber
    pub const UNDER: u8 = 179;
    /// Fully allocated: green
    pub const FULL: u8 = 108;
    /// Over-allocated: red
    pub const OVER: u8 = 167;
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }

    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }

    std::io::stdout().is_terminal()
}

/// Format a 256-color ANSI escape sequence for foreground color.
fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    format!("{}{}{}", fg256(code), text, RESET)
}

/// Apply header color (section titles) to text.
pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

/// Apply literal color (commands, options) to text.
pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

/// Apply context color (default values, hints) to text.
pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Color an allocation status label when writing to a terminal.
pub fn status(status: AllocationStatus) -> String {
    if !should_colorize() {
        return status.as_str().to_string();
    }
    let code = match status {
        AllocationStatus::Under => codes::UNDER,
        AllocationStatus::Full => codes::FULL,
        AllocationStatus::Over => codes::OVER,
    };
    paint(code, status.as_str())
}

/// Colorize an examples help block.
///
/// Lines ending with `:` are section headers. Other lines are split at the
/// first two-space gap into a command (literal) and a description.
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + 128);
    for line in text.lines() {
        if !result.is_empty() {
            result.push('\n');
        }

        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];

        if trimmed.ends_with(':') && !trimmed.contains("  ") {
            result.push_str(indent);
            result.push_str(&header(trimmed));
        } else if let Some(cmd_end) = find_description_start(trimmed) {
            result.push_str(indent);
            result.push_str(&literal(&trimmed[..cmd_end]));
            result.push_str(&trimmed[cmd_end..]);
        } else {
            result.push_str(line);
        }
    }
    result
}

/// Byte offset where a two-space gap separates a command from its description.
fn find_description_start(line: &str) -> Option<usize> {
    let gap = line.find("  ")?;
    if line[gap..].trim_start().is_empty() {
        return None;
    }
    Some(gap)
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
