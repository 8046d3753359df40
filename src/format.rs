//! Fix runner: reorders members in source files described by dumps.
//!
//! Each file is fixed by the engine's bounded loop, one move per pass with
//! re-analysis in between. Declarations are processed last to first; moves
//! never change the length of the text they touch, so one dump stays valid
//! for every declaration in the file.

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::lint::{collect_targets, display_path, load_dump, LoadedDump};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FormatResult {
    pub file: String,
    pub changed: bool,
    pub passes: usize,
    pub preview: Option<String>,
    pub original: Option<String>,
    pub error: Option<String>,
}

impl FormatResult {
    fn failed(file: String, error: String) -> Self {
        FormatResult {
            file,
            changed: false,
            passes: 0,
            preview: None,
            original: None,
            error: Some(error),
        }
    }
}

/// Fix every source described by dumps matched by `patterns`.
///
/// When `write` is false, changed files carry a preview of the fixed text;
/// `capture_old` also keeps the original for diffs. A source is fixed once,
/// by the first dump naming it; later dumps for it are reported as errors.
pub fn run_format(
    root: &Path,
    patterns: &[String],
    engine: &Engine,
    write: bool,
    capture_old: bool,
) -> Vec<FormatResult> {
    let targets = collect_targets(root, patterns);
    let loaded: Vec<(&PathBuf, Result<LoadedDump>)> =
        targets.par_iter().map(|p| (p, load_dump(p))).collect();

    let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut results = Vec::new();
    let mut jobs = Vec::new();
    for (dump_path, res) in loaded {
        let l = match res {
            Ok(l) => l,
            Err(e) => {
                results.push(FormatResult::failed(display_path(root, dump_path), e.to_string()));
                continue;
            }
        };
        let key = fs::canonicalize(&l.source_path).unwrap_or_else(|_| l.source_path.clone());
        match owners.get(&key) {
            Some(first) => {
                let err = Error::DuplicateSource {
                    path: l.source_path.clone(),
                    first: first.clone(),
                };
                results.push(FormatResult::failed(display_path(root, dump_path), err.to_string()));
            }
            None => {
                owners.insert(key, dump_path.clone());
                jobs.push(l);
            }
        }
    }
    results.par_extend(
        jobs.par_iter()
            .map(|l| format_loaded(root, l, engine, write, capture_old)),
    );
    results.sort_by(|a, b| a.file.cmp(&b.file));
    results
}

/// Load one dump and fix the source it describes.
pub fn format_file(
    root: &Path,
    dump_path: &Path,
    engine: &Engine,
    write: bool,
    capture_old: bool,
) -> FormatResult {
    match load_dump(dump_path) {
        Ok(l) => format_loaded(root, &l, engine, write, capture_old),
        Err(e) => FormatResult::failed(display_path(root, dump_path), e.to_string()),
    }
}

fn format_loaded(
    root: &Path,
    loaded: &LoadedDump,
    engine: &Engine,
    write: bool,
    capture_old: bool,
) -> FormatResult {
    let file = display_path(root, &loaded.source_path);
    let outcome = match engine.fix_all(&loaded.source, &loaded.dump.declarations, &loaded.aliases())
    {
        Ok(o) => o,
        Err(e) => return FormatResult::failed(file, e.to_string()),
    };
    let changed = outcome.source != loaded.source;
    debug!(file = %file, passes = outcome.passes, changed, "fixed");
    let original = if capture_old {
        Some(loaded.source.clone())
    } else {
        None
    };
    if changed && write {
        if let Err(e) = fs::write(&loaded.source_path, &outcome.source) {
            return FormatResult::failed(file, format!("write failed: {}", e));
        }
        return FormatResult {
            file,
            changed,
            passes: outcome.passes,
            preview: None,
            original,
            error: None,
        };
    }
    FormatResult {
        file,
        changed,
        passes: outcome.passes,
        preview: if changed { Some(outcome.source) } else { None },
        original,
        error: None,
    }
}
