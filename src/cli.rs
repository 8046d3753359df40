//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ordlint",
    version,
    about = "Enforce member order in component declarations",
    long_about = "ordlint — check and fix the order of members (services, properties, lifecycle hooks, actions, methods) in component declarations described by declaration dumps.\n\nConfiguration precedence: CLI > ordlint.toml > defaults.",
    after_help = "Examples:\n  ordlint lint 'dumps/**/*.json'\n  ordlint format --diff\n  ordlint format --write --order 'spread,service,property,lifecycle-hook,method'\n  ordlint explain dumps/my-component.decl.json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current ordlint version.")]
    Version,
    /// Report the first out-of-order member of each declaration
    #[command(
        about = "Run order checks",
        long_about = "Check member order of every declaration in the matched dumps. Exits 1 when an error-level issue is found.",
        after_help = "Examples:\n  ordlint lint\n  ordlint lint 'dumps/**/*.json' --output json"
    )]
    Lint {
        #[arg(help = "Dump file glob patterns, relative to the repo root")]
        patterns: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Category order, comma or space separated; join names with + to share a rank")]
        order: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Reorder members in place
    #[command(
        about = "Apply member order fixes",
        long_about = "Move out-of-order members one at a time until every declaration is ordered. When --diff or --check is set, write is disabled.",
        after_help = "Examples:\n  ordlint format --diff\n  ordlint format --write"
    )]
    Format {
        #[arg(help = "Dump file glob patterns, relative to the repo root")]
        patterns: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Category order, comma or space separated; join names with + to share a rank")]
        order: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write changes to files")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show diffs for changed files (implies write=false)")]
        diff: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur (implies write=false)")]
        check: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Print the normalized category order
    #[command(
        about = "Show effective order",
        long_about = "Print the category order after lifecycle-hook expansion and backward-compatible aliasing."
    )]
    Order {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Category order, comma or space separated; join names with + to share a rank")]
        order: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Show the category of every member in a dump
    #[command(
        about = "Explain member categories",
        long_about = "Classify every member of every declaration in one dump, including action maps."
    )]
    Explain {
        #[arg(help = "Path to a declaration dump")]
        dump: String,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_flags_and_patterns() {
        let cli = Cli::try_parse_from([
            "ordlint", "format", "a/*.json", "b/*.json", "--diff", "--order", "spread,method",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Format {
                patterns,
                diff,
                write,
                order,
                ..
            } => {
                assert_eq!(patterns, ["a/*.json", "b/*.json"]);
                assert!(diff);
                assert!(!write);
                assert_eq!(order.as_deref(), Some("spread,method"));
            }
            _ => panic!("expected format"),
        }
    }

    #[test]
    fn explain_requires_dump() {
        assert!(Cli::try_parse_from(["ordlint", "explain"]).is_err());
    }
}
