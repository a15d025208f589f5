//! Output formatting utilities

use colored::Colorize;

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print a labelled value, label padded to line up
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{:<12} {}", format!("{}:", label).bold(), value);
}

/// Print log lines
pub fn print_logs(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
