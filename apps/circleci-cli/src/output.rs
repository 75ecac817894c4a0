//! Output formatting for circleci-tasks.

use std::io::IsTerminal;

use circleci_tasks::TaskListing;

/// Output formatter for CLI messages.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Use colors in output.
    colors_enabled: bool,
}

impl OutputFormatter {
    /// Create a formatter, with colors when stdout is a terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        let prefix = if self.colors_enabled {
            "\x1b[32m✓\x1b[0m"
        } else {
            "✓"
        };
        println!("{prefix} {message}");
    }

    /// Print an error message to stderr.
    pub fn error(&self, message: &str) {
        let prefix = if self.colors_enabled {
            "\x1b[31m✗\x1b[0m"
        } else {
            "✗"
        };
        eprintln!("{prefix} {message}");
    }

    /// Print the task list.
    pub fn task_list(&self, listings: &[TaskListing]) {
        print!("{}", format_task_list(listings));
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self {
            colors_enabled: std::io::stdout().is_terminal(),
        }
    }
}

/// One line per task: the name padded to the longest name, then `# description`.
#[must_use]
pub fn format_task_list(listings: &[TaskListing]) -> String {
    let width = listings.iter().map(|l| l.name.len()).max().unwrap_or(0);
    listings
        .iter()
        .map(|l| format!("{:<width$}  # {}\n", l.name, l.description))
        .collect()
}
