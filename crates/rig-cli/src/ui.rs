//! Status messages for terminal output.
//!
//! Everything here writes to stderr; stdout is reserved for command output.
//! `--quiet` silences all of it.

use std::sync::atomic::{AtomicBool, Ordering};

use console::style;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress status messages for the rest of the process.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, then falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support. Call early in `main`.
pub fn init_colors(no_color: bool) {
    console::set_colors_enabled_stderr(!no_color && should_use_color());
}

pub fn success(message: &str) {
    if is_quiet() {
        return;
    }
    eprintln!("{} {}", style("✓").green().bold(), message);
}

pub fn info(message: &str) {
    if is_quiet() {
        return;
    }
    eprintln!("{} {}", style("ℹ").blue().bold(), message);
}

pub fn warning(message: &str) {
    if is_quiet() {
        return;
    }
    eprintln!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Indented detail line under a status message
pub fn detail(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    eprintln!("  {} {}", style(label).dim(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages_do_not_panic() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        detail("entry", "main -> ./web/index.js");
    }
}
