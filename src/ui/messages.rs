//! Operator-facing output. Every line is icon-prefixed; errors go to stderr.

use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};
use std::fmt;

const BOLD: &str = "\x1b[1m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn line<T: fmt::Display>(color: &str, icon: &str, msg: T) -> String {
    format!("{color}{BOLD}{icon}{RESET} {msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(CYAN, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(GREEN, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(RED, ICON_ERR, msg));
}

/// Indented follow-up line under a previous message (e.g. records moved by a completion).
pub fn detail<T: fmt::Display>(msg: T) {
    println!("   {GREY}↳{RESET} {msg}");
}

/// Section header for a screen or a listing.
pub fn header<T: fmt::Display>(msg: T) {
    println!("\n{CYAN}{BOLD}== {msg} =={RESET}");
}
