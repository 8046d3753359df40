//! Lint runner over declaration dumps.
//!
//! Produces a `LintResult` with one issue per out-of-order declaration and a
//! summary. Files are analyzed in parallel; each file's alias table and
//! declarations are independent of every other file.

use crate::alias::AliasTable;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::models::dump::SourceDump;
use crate::models::{Issue, LintResult, Summary};
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const RULE: &str = "order-in-components";

/// A dump with its source text resolved.
#[derive(Debug, Clone)]
pub struct LoadedDump {
    pub dump_path: PathBuf,
    pub source_path: PathBuf,
    pub source: String,
    pub dump: SourceDump,
}

impl LoadedDump {
    pub fn aliases(&self) -> AliasTable {
        AliasTable::from_imports(&self.dump.imports)
    }
}

/// Read a dump and the source it describes.
pub fn load_dump(dump_path: &Path) -> Result<LoadedDump> {
    let raw = fs::read_to_string(dump_path).map_err(|source| Error::Io {
        path: dump_path.to_path_buf(),
        source,
    })?;
    let mut dump: SourceDump = serde_json::from_str(&raw).map_err(|source| Error::Dump {
        path: dump_path.to_path_buf(),
        source,
    })?;
    let source_path = {
        let p = PathBuf::from(&dump.path);
        if p.is_absolute() {
            p
        } else {
            dump_path.parent().unwrap_or(Path::new(".")).join(p)
        }
    };
    let source = match dump.source.take() {
        Some(s) => s,
        None => fs::read_to_string(&source_path).map_err(|source| Error::Io {
            path: source_path.clone(),
            source,
        })?,
    };
    Ok(LoadedDump {
        dump_path: dump_path.to_path_buf(),
        source_path,
        source,
        dump,
    })
}

/// Expand glob patterns relative to `root` into a sorted, de-duplicated list.
pub fn collect_targets(root: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(paths) => targets.extend(paths.flatten().filter(|p| p.is_file())),
            Err(e) => warn!("bad glob pattern `{}`: {}", pat, e),
        }
    }
    targets.sort();
    targets.dedup();
    targets
}

/// Path shown to users: relative to the repo root when possible.
pub fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .filter(|p| !p.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

/// Run lint across dumps matched by `patterns`.
///
/// Severity of order issues comes from `level`; load and span errors are
/// always `error`.
pub fn run_lint(root: &Path, patterns: &[String], engine: &Engine, level: &str) -> LintResult {
    let targets = collect_targets(root, patterns);
    debug!(files = targets.len(), "linting declaration dumps");
    let mut issues: Vec<Issue> = targets
        .par_iter()
        .flat_map_iter(|path| lint_file(root, path, engine, level))
        .collect();
    issues.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.line.cmp(&b.line))
            .then(a.message.cmp(&b.message))
    });
    let summary = Summary::from_issues(&issues, targets.len());
    LintResult { issues, summary }
}

/// Lint one dump file, turning load failures into issues.
pub fn lint_file(root: &Path, path: &Path, engine: &Engine, level: &str) -> Vec<Issue> {
    let loaded = match load_dump(path) {
        Ok(l) => l,
        Err(e) => return vec![error_issue(display_path(root, path), &e)],
    };
    lint_loaded(root, &loaded, engine, level)
}

pub fn lint_loaded(root: &Path, loaded: &LoadedDump, engine: &Engine, level: &str) -> Vec<Issue> {
    let file = display_path(root, &loaded.source_path);
    let aliases = loaded.aliases();
    let mut issues = Vec::new();
    for (decl, res) in loaded.dump.declarations.iter().zip(engine.check_all(
        &loaded.source,
        &loaded.dump.declarations,
        &aliases,
    )) {
        match res {
            Ok(Some(f)) => issues.push(Issue {
                file: file.clone(),
                rule: RULE.to_string(),
                severity: level.to_string(),
                path: format!("{}.{}", f.declaration, f.member),
                line: f.line,
                column: f.column,
                message: f.message,
            }),
            Ok(None) => debug!(file = %file, declaration = %decl.label(), "in order"),
            Err(e) => issues.push(error_issue(file.clone(), &e)),
        }
    }
    issues
}

pub(crate) fn error_issue(file: String, err: &Error) -> Issue {
    Issue {
        file,
        rule: err.rule().to_string(),
        severity: "error".into(),
        path: "$".into(),
        line: 1,
        column: 1,
        message: err.to_string(),
    }
}
