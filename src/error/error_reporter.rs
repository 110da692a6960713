// src/error/error_reporter.rs
use console::style;

use crate::error::compile_error::CompileError;

/// Prints `CompileError`s with a source-line excerpt and an underline,
/// grounded on `jsavrs::error::error_reporter::ErrorReporter`.
pub struct ErrorReporter<'a> {
    source: &'a str,
}

impl<'a> ErrorReporter<'a> {
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn report_all(&self, errors: &[CompileError]) {
        for error in errors {
            self.report(error);
        }
    }

    pub fn report(&self, error: &CompileError) {
        let span = error.span();
        let (line, col) = span.line_col(self.source);
        eprintln!(
            "{} {}: {}\n{} line {}, column {}",
            style("error").red().bold(),
            style(error.category()).red(),
            style(error.message()).yellow(),
            style("-->").blue(),
            line,
            col,
        );

        let source_line = span.source_line(self.source);
        if source_line.is_empty() {
            return;
        }
        eprintln!("{line:>4} | {source_line}");
        let width = (span.end.saturating_sub(span.start)).max(1);
        let underline = " ".repeat(col.saturating_sub(1)) + &"^".repeat(width);
        eprintln!("     | {}", style(underline).red().bold());
    }
}
