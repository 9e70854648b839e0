//! Formatting helpers for terminal output.
//!
//! Human-readable output goes to stdout with raw ANSI styling; errors and
//! warnings go to stderr. JSON rendering lives with the commands, not here.

/// Print an error message in red to stderr.
pub fn error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {message}");
}

/// Print a warning message in yellow to stderr.
pub fn warning(message: &str) {
    eprintln!("\x1b[33mWARNING:\x1b[0m {message}");
}

/// Print a success line with a green checkmark.
pub fn success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {message}");
}

/// Print an aligned `label: value` line with a bold label.
pub fn field(label: &str, value: &str) {
    println!("\x1b[1m{label:<12}\x1b[0m {value}");
}

pub fn bold(text: &str) -> String {
    format!("\x1b[1m{text}\x1b[0m")
}

pub fn green(text: &str) -> String {
    format!("\x1b[32m{text}\x1b[0m")
}

pub fn red(text: &str) -> String {
    format!("\x1b[31m{text}\x1b[0m")
}

pub fn yellow(text: &str) -> String {
    format!("\x1b[33m{text}\x1b[0m")
}

pub fn dim(text: &str) -> String {
    format!("\x1b[2m{text}\x1b[0m")
}
