/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

use crate::core::calculator::billing::Classification;

/// Color for a session classification:
/// paid → green, pending → yellow, not billable → grey
pub fn color_for_classification(c: Classification) -> &'static str {
    match c {
        Classification::Paid => GREEN,
        Classification::Pending => YELLOW,
        Classification::NotBillable => GREY,
    }
}

/// Pending amounts are highlighted in red, zero stays neutral.
pub fn color_for_pending(cents: i64) -> &'static str {
    if cents > 0 { RED } else { RESET }
}

/// Grey `--` for an empty value, the value itself otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
