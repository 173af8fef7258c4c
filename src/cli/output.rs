//! Output formatting for CLI results
//!
//! Human-readable colored output by default; structured JSON when the
//! `--json` flag is set.

use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Formats command results for the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    json: bool,
    no_color: bool,
}

impl OutputFormatter {
    #[must_use]
    pub const fn new(json: bool, no_color: bool) -> Self {
        Self { json, no_color }
    }

    /// Whether JSON output mode is active
    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: &str) {
        if self.json {
            return;
        }
        if self.no_color {
            println!("{message}");
        } else {
            println!("{}", message.green());
        }
    }

    pub fn info(&self, message: &str) {
        if self.json {
            return;
        }
        println!("{message}");
    }

    pub fn warning(&self, message: &str) {
        if self.json {
            return;
        }
        if self.no_color {
            eprintln!("Warning: {message}");
        } else {
            eprintln!("{} {message}", "Warning:".yellow().bold());
        }
    }

    pub fn error(&self, message: &str) {
        if self.no_color {
            eprintln!("Error: {message}");
        } else {
            eprintln!("{} {message}", "Error:".red().bold());
        }
    }

    /// Print a serializable value as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| crate::error::HelpdeskError::Serialization(e.to_string()))?;
        println!("{rendered}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_flag() {
        assert!(OutputFormatter::new(true, false).is_json());
        assert!(!OutputFormatter::new(false, true).is_json());
    }
}
