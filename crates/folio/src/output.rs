//! Build report formatting for the terminal.

use console::{Style, Term};
use folio_build::BuildReport;

/// Writes build outcomes to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print the outcome of a successful build or check (green).
    pub(crate) fn report(&self, report: &BuildReport, check: bool) {
        let _ = self
            .term
            .write_line(&self.green.apply_to(summary(report, check)).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// List out-of-date artifacts, one per line.
    pub(crate) fn stale_paths(&self, paths: &[String]) {
        for line in stale_lines(paths) {
            let _ = self.term.write_line(&self.dim.apply_to(line).to_string());
        }
    }
}

fn summary(report: &BuildReport, check: bool) -> String {
    if check {
        format!("{} generated file(s) are up to date", report.artifacts.len())
    } else {
        format!(
            "Built {} file(s): {} written, {} unchanged",
            report.artifacts.len(),
            report.persisted.written,
            report.persisted.unchanged
        )
    }
}

fn stale_lines(paths: &[String]) -> impl Iterator<Item = String> + '_ {
    paths.iter().map(|path| format!("  {path}"))
}
