//! ordlint CLI binary entry point.
//! Delegates to library modules for lint/format/order/explain and prints results.

use clap::Parser;
use ordlint::classify::classify_members;
use ordlint::cli::{Cli, Commands};
use ordlint::config::{self, Effective};
use ordlint::utils::{error_prefix, info_prefix, note_prefix};
use ordlint::{format, lint, output, Engine, NormalizedOrder};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ORDLINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            patterns,
            repo_root,
            order,
            output,
        } => {
            let eff = resolve_or_exit(
                repo_root.as_deref(),
                order.as_deref(),
                output.as_deref(),
                &patterns,
                None,
                None,
                None,
            );
            announce(&eff);
            let engine = engine_for(&eff);
            let result = lint::run_lint(&eff.repo_root, &eff.patterns, &engine, &eff.level);
            output::print_lint(&result, &eff.output);
            if result.summary.errors > 0 {
                std::process::exit(1);
            }
        }
        Commands::Format {
            patterns,
            repo_root,
            order,
            write,
            diff,
            check,
            output,
        } => {
            let eff = resolve_or_exit(
                repo_root.as_deref(),
                order.as_deref(),
                output.as_deref(),
                &patterns,
                if write { Some(true) } else { None },
                if diff { Some(true) } else { None },
                if check { Some(true) } else { None },
            );
            announce(&eff);
            // If diff or check is enabled, force write=false for this run.
            let eff_write = if eff.diff || eff.check {
                false
            } else {
                eff.write
            };
            let engine = engine_for(&eff);
            let results = format::run_format(
                &eff.repo_root,
                &eff.patterns,
                &engine,
                eff_write,
                eff.diff || eff.check,
            );
            output::print_format(&results, &eff.output, eff_write, eff.diff);
            if results.iter().any(|r| r.error.is_some()) {
                std::process::exit(1);
            }
            if eff.check && results.iter().any(|r| r.changed) {
                std::process::exit(1);
            }
        }
        Commands::Order {
            repo_root,
            order,
            output,
        } => {
            let eff = resolve_or_exit(
                repo_root.as_deref(),
                order.as_deref(),
                output.as_deref(),
                &[],
                None,
                None,
                None,
            );
            output::print_order(&normalized(&eff), &eff.output);
        }
        Commands::Explain {
            dump,
            repo_root,
            output,
        } => {
            let eff = resolve_or_exit(
                repo_root.as_deref(),
                None,
                output.as_deref(),
                &[],
                None,
                None,
                None,
            );
            let loaded = match lint::load_dump(Path::new(&dump)) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            };
            let aliases = loaded.aliases();
            let decls: Vec<_> = loaded
                .dump
                .declarations
                .iter()
                .map(|d| (d.label(), classify_members(&d.members, &aliases)))
                .collect();
            output::print_explain(&decls, &eff.output);
        }
    }
}

fn resolve_or_exit(
    repo_root: Option<&str>,
    order: Option<&str>,
    output: Option<&str>,
    patterns: &[String],
    write: Option<bool>,
    diff: Option<bool>,
    check: Option<bool>,
) -> Effective {
    match config::resolve_effective(repo_root, order, output, patterns, write, diff, check) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            std::process::exit(2);
        }
    }
}

/// Friendly notes on stderr for human output only.
fn announce(eff: &Effective) {
    if eff.output == "json" {
        return;
    }
    if !eff.config_found {
        eprintln!("{} No ordlint.toml found; using defaults.", note_prefix());
    }
    eprintln!("{} Using patterns: [{}]", info_prefix(), eff.patterns.join(", "));
}

fn normalized(eff: &Effective) -> NormalizedOrder {
    NormalizedOrder::from_items(eff.order.as_deref())
}

fn engine_for(eff: &Effective) -> Engine {
    Engine::new(normalized(eff)).with_max_passes(eff.max_passes)
}
