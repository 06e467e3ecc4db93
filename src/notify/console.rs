//! Colored console output for monitor cycles.

use crate::types::Feed;
use colored::Colorize;

/// Console output handler for per-cycle status and alerts.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutput {
    quiet: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler. In quiet mode only alerts and
    /// errors are printed.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print the status line for one completed cycle.
    pub fn print_cycle(&self, time: &str, feed: Feed, reading: f64, status: &str) {
        if self.quiet {
            return;
        }

        println!(
            "{} {} {} {}",
            time.dimmed(),
            format!("[{}]", feed).bright_blue(),
            format!("reading {:.2}", reading),
            status.dimmed()
        );
    }

    /// Print a dispatched alert.
    pub fn print_alert(&self, time: &str, feed: Feed, bucket: f64, message: &str) {
        println!(
            "{} {} {} {}",
            time.dimmed(),
            format!("[{}]", feed).bright_blue(),
            format!("ALERT >= {}", bucket).red().bold(),
            message.bright_white().bold()
        );
    }

    /// Print a recoverable cycle failure.
    pub fn print_failure(&self, time: &str, feed: Feed, error: &str) {
        println!(
            "{} {} {}",
            time.dimmed(),
            format!("[{}]", feed).bright_blue(),
            format!("cycle failed: {}", error).yellow()
        );
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_output_creation() {
        let output = ConsoleOutput::new(true);
        assert!(output.quiet);
        assert!(!ConsoleOutput::default().quiet);
    }

    #[test]
    fn test_printing_does_not_panic() {
        let output = ConsoleOutput::new(false);
        output.print_cycle("18:05", Feed::Aurora, 45.0, "idle");
        output.print_alert("18:05", Feed::Aurora, 80.0, "Very likely!");
        output.print_failure("18:05", Feed::KIndex, "timeout");
    }
}
