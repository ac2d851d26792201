//! Shared CLI output helpers.
//!
//! Status messages go to stderr so stdout carries only command output
//! (`bens environment` is meant to be `eval`ed). Colors respect `NO_COLOR`.
//!
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, names, hints

use console::style;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Print a success message with checkmark.
///
/// Example: `✓ added DATABASE_URL`
pub fn success(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✓").green().for_stderr(), msg);
    } else {
        eprintln!("✓ {}", msg);
    }
}

/// Print an error message.
///
/// Example: `✗ pub.key: PEM file doesn't contain any blocks`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red().for_stderr(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message.
pub fn warn(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("⚠").yellow().for_stderr(), msg);
    } else {
        eprintln!("⚠ {}", msg);
    }
}

/// Print a hint message.
///
/// Example: `→ run: bens keygen --force`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!(
            "{} {}",
            style("→").cyan().for_stderr(),
            style(msg).cyan().for_stderr()
        );
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Format a path for inline use.
pub fn path(p: &std::path::Path) -> String {
    if colors_enabled() {
        style(p.display()).cyan().for_stderr().to_string()
    } else {
        p.display().to_string()
    }
}

/// Format an entry name for inline use.
pub fn key(k: &str) -> String {
    if colors_enabled() {
        style(k).cyan().for_stderr().to_string()
    } else {
        k.to_string()
    }
}
