//! Status lines on stderr, in the `  Label message` layout cargo uses.
//!
//! Stdout stays reserved for command output (trees, classpaths) so it can be
//! piped.

use std::io::Write;

use console::Style;

/// What a status line reports, which decides the label colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A step finished (green).
    Done,
    /// A step is starting or a neutral fact (cyan).
    Info,
    /// Something the user should look at; not fatal (yellow).
    Warn,
}

impl Status {
    fn style(self) -> Style {
        let style = Style::new().bold();
        match self {
            Status::Done => style.green(),
            Status::Info => style.cyan(),
            Status::Warn => style.yellow(),
        }
    }
}

/// Format one status line with the label right-aligned to 12 columns.
pub fn format_status(status: Status, label: &str, message: &str) -> String {
    format!("{:>12} {message}", status.style().apply_to(label))
}

/// Print one status line to stderr. Write failures are ignored.
pub fn report(status: Status, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{}", format_status(status, label, message));
}
