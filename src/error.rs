//! Error types for ordlint.
//!
//! Order violations are not errors; they are reported as issues. The
//! variants here cover input that cannot be analyzed and fix loops that
//! fail to settle.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("declaration dump {} is not valid JSON: {source}", path.display())]
    Dump {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config {} could not be parsed: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A member span lies outside the source, overlaps a sibling, or splits a
    /// UTF-8 character.
    #[error("invalid span {start}..{end} for member `{member}`: {reason}")]
    InvalidSpan {
        member: String,
        start: usize,
        end: usize,
        reason: &'static str,
    },

    /// Two dumps describe the same source; fixing both would overwrite one
    /// result with the other.
    #[error("{} is already described by {}", path.display(), first.display())]
    DuplicateSource { path: PathBuf, first: PathBuf },

    /// The fix loop hit its pass cap while violations remained.
    #[error("fix did not converge for `{declaration}` after {passes} passes")]
    FixDidNotConverge { declaration: String, passes: usize },
}

impl Error {
    /// Rule id used when the error is surfaced as a lint issue.
    pub fn rule(&self) -> &'static str {
        match self {
            Error::Io { .. } | Error::Dump { .. } | Error::DuplicateSource { .. } => "load-dump",
            Error::Config { .. } => "load-config",
            Error::InvalidSpan { .. } => "invalid-span",
            Error::FixDidNotConverge { .. } => "fix-loop",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
