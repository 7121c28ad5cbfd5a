//! Console output formatting and the console-backed merge observer.

use crate::merge::{MergeEvent, MergeObserver};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Merge observer that prints each step transition as a status line.
pub struct ConsoleObserver;

impl MergeObserver for ConsoleObserver {
    fn on_event(&self, event: &MergeEvent) {
        display_status(&event.to_string());
    }
}
