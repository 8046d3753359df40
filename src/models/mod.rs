//! Shared data models for lint/format outputs and the declaration dump.

pub mod dump;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
/// A single lint issue with severity and location.
pub struct Issue {
    pub file: String,
    pub rule: String,
    pub severity: String,
    /// `<declaration>.<member>` for order issues, `$` for file-level ones.
    pub path: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
}

impl Summary {
    pub fn from_issues(issues: &[Issue], files: usize) -> Self {
        let mut s = Summary {
            files,
            ..Summary::default()
        };
        for is in issues {
            match is.severity.as_str() {
                "error" => s.errors += 1,
                "warning" | "warn" => s.warnings += 1,
                _ => s.infos += 1,
            }
        }
        s
    }
}

#[derive(Debug, Clone, Serialize)]
/// Lint results container.
pub struct LintResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}
