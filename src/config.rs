//! Configuration discovery and effective settings resolution.
//!
//! ordlint reads `ordlint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `order`: built-in category order
//! - `patterns`: `**/*.decl.json`
//! - `output`: `human`
//! - `level`: `error`
//! - `format.write|diff|check`: false
//! - `format.max_passes`: member count of each declaration
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::normalize::OrderItem;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const DEFAULT_PATTERN: &str = "**/*.decl.json";
const CONFIG_NAMES: [&str; 3] = ["ordlint.toml", "ordlint.yaml", "ordlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Fix-related configuration section under `[format]`.
pub struct FormatCfg {
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
    pub max_passes: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `ordlint.toml|yaml`.
pub struct OrdlintConfig {
    /// Category order: names, or lists of names sharing a rank. Entries of
    /// any other shape are kept and degrade during normalization.
    pub order: Option<Vec<OrderItem>>,
    pub patterns: Option<Vec<String>>,
    pub output: Option<String>,
    /// Severity of order issues: error|warn|info.
    pub level: Option<String>,
    pub format: Option<FormatCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub order: Option<Vec<OrderItem>>,
    pub patterns: Vec<String>,
    pub output: String,
    pub level: String,
    pub write: bool,
    pub diff: bool,
    pub check: bool,
    pub max_passes: Option<usize>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when an `ordlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `OrdlintConfig` from `ordlint.toml` or `ordlint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<OrdlintConfig>> {
    for name in CONFIG_NAMES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let cfg = if name.ends_with(".toml") {
            toml::from_str::<OrdlintConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<OrdlintConfig>(&s).map_err(|e| e.to_string())
        };
        return cfg.map(Some).map_err(|message| Error::Config { path, message });
    }
    Ok(None)
}

/// Split a CLI `--order` value on commas and/or whitespace.
pub fn parse_order_list(raw: &str) -> Vec<String> {
    static SEP: OnceLock<Regex> = OnceLock::new();
    let sep = SEP.get_or_init(|| Regex::new(r"[,\s]+").expect("static regex"));
    sep.split(raw.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a CLI `--order` value; `a+b` makes a group sharing one rank.
pub fn parse_order_items(raw: &str) -> Vec<OrderItem> {
    parse_order_list(raw)
        .into_iter()
        .map(|token| {
            if token.contains('+') {
                OrderItem::Group(
                    token
                        .split('+')
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                )
            } else {
                OrderItem::Name(token)
            }
        })
        .collect()
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_order: Option<&str>,
    cli_output: Option<&str>,
    cli_patterns: &[String],
    cli_write: Option<bool>,
    cli_diff: Option<bool>,
    cli_check: Option<bool>,
) -> Result<Effective> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let order = cli_order.map(parse_order_items).or(cfg.order);
    let patterns = if !cli_patterns.is_empty() {
        cli_patterns.to_vec()
    } else {
        cfg.patterns
            .unwrap_or_else(|| vec![DEFAULT_PATTERN.to_string()])
    };
    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let level = cfg.level.unwrap_or_else(|| "error".to_string());

    let write = cli_write
        .or_else(|| cfg.format.as_ref().and_then(|f| f.write))
        .unwrap_or(false);
    let diff = cli_diff
        .or_else(|| cfg.format.as_ref().and_then(|f| f.diff))
        .unwrap_or(false);
    let check = cli_check
        .or_else(|| cfg.format.as_ref().and_then(|f| f.check))
        .unwrap_or(false);
    let max_passes = cfg.format.as_ref().and_then(|f| f.max_passes);

    Ok(Effective {
        repo_root,
        config_found,
        order,
        patterns,
        output,
        level,
        write,
        diff,
        check,
        max_passes,
    })
}
