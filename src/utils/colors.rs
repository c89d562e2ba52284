/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Colored placeholder for empty optional values (times, detail).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--:--{RESET}")
    } else {
        value.to_string()
    }
}

/// In-progress records in yellow, completed ones in green.
pub fn colorize_status(label: &str, completed: bool) -> String {
    if completed {
        format!("{GREEN}{label}{RESET}")
    } else {
        format!("{YELLOW}{label}{RESET}")
    }
}
