//! Output rendering for lint, format, order and explain commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::classify::ClassifiedMember;
use crate::format::FormatResult;
use crate::models::LintResult;
use crate::normalize::NormalizedOrder;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn print_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
    }
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    match output {
        "json" => print_json(&compose_lint_json(res)),
        _ => {
            let color = use_colors(output);
            for is in &res.issues {
                let (sev, icon) = match is.severity.as_str() {
                    "error" => ("⟦error⟧", "✖"),
                    "warning" | "warn" => ("⟦warn⟧", "▲"),
                    _ => ("⟦info⟧", "◆"),
                };
                let location = format!("{}:{}:{}", is.file, is.line, is.column);
                if color {
                    let (sev, icon) = match is.severity.as_str() {
                        "error" => (sev.red().bold().to_string(), icon.red().to_string()),
                        "warning" | "warn" => {
                            (sev.yellow().bold().to_string(), icon.yellow().to_string())
                        }
                        _ => (sev.blue().bold().to_string(), icon.blue().to_string()),
                    };
                    println!(
                        "{} {} {} ❲{}❳ {}",
                        icon,
                        sev,
                        location.bold(),
                        is.rule,
                        is.message
                    );
                } else {
                    println!("{} {} {} ❲{}❳ {}", icon, sev, location, is.rule, is.message);
                }
            }
            let summary = format!(
                "Summary: errors={} warnings={} infos={} files={}",
                res.summary.errors, res.summary.warnings, res.summary.infos, res.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print fix results. When `write` is false, previews and diffs can be
/// emitted; otherwise only file statuses are shown.
pub fn print_format(results: &[FormatResult], output: &str, write: bool, diff: bool) {
    match output {
        "json" => print_json(&compose_format_json(results, write, diff)),
        _ => {
            let color = use_colors(output);
            for r in results {
                if let Some(err) = &r.error {
                    eprintln!("{} {}: {}", crate::utils::error_prefix(), r.file, err);
                } else if !r.changed {
                    if color {
                        println!("{} {}", "no changes:".bright_black(), r.file);
                    } else {
                        println!("no changes: {}", r.file);
                    }
                } else if write {
                    if color {
                        println!(
                            "{} {} ({} moves)",
                            "reordered:".green().bold(),
                            r.file.bold(),
                            r.passes
                        );
                    } else {
                        println!("reordered: {} ({} moves)", r.file, r.passes);
                    }
                } else {
                    let body = if diff {
                        build_line_diff(r.original.as_deref(), r.preview.as_deref())
                            .or_else(|| r.preview.clone())
                    } else {
                        r.preview.clone()
                    };
                    if let Some(body) = body {
                        if color {
                            println!("{} {}\n{}", "---".cyan().bold(), r.file.bold(), body);
                        } else {
                            println!("--- {}\n{}", r.file, body);
                        }
                    }
                }
            }
        }
    }
}

/// Print the normalized order, one slot per line with its rank.
pub fn print_order(order: &NormalizedOrder, output: &str) {
    match output {
        "json" => print_json(&json!({ "order": order.entries() })),
        _ => {
            for (i, entry) in order.entries().iter().enumerate() {
                println!("{:>3}  {}", i, entry);
            }
        }
    }
}

/// Print member categories for each declaration of a dump.
pub fn print_explain(decls: &[(String, Vec<ClassifiedMember<'_>>)], output: &str) {
    match output {
        "json" => {
            let items: Vec<_> = decls
                .iter()
                .map(|(label, members)| json!({ "declaration": label, "members": members }))
                .collect();
            print_json(&json!({ "declarations": items }));
        }
        _ => {
            let color = use_colors(output);
            for (label, members) in decls {
                if color {
                    println!("{}", label.bold());
                } else {
                    println!("{}", label);
                }
                print_members(members, 1);
            }
        }
    }
}

fn print_members(members: &[ClassifiedMember<'_>], depth: usize) {
    for m in members {
        println!("{}{:<28} {}", "  ".repeat(depth), m.name, m.category);
        print_members(&m.nested, depth + 1);
    }
}

/// Minimal line diff: common prefix and suffix are skipped, the differing
/// middle is shown as removed then added lines.
fn build_line_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old: Vec<&str> = old?.lines().collect();
    let new: Vec<&str> = new?.lines().collect();
    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let mut out = format!("@@ line {} @@\n", prefix + 1);
    for l in &old[prefix..old.len() - suffix] {
        out.push_str(&format!("-{}\n", l));
    }
    for l in &new[prefix..new.len() - suffix] {
        out.push_str(&format!("+{}\n", l));
    }
    Some(out)
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    serde_json::to_value(res).unwrap_or(JsonVal::Null)
}

/// Compose format JSON object (pure) for testing/snapshot purposes.
pub fn compose_format_json(results: &[FormatResult], write: bool, diff: bool) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "changed": r.changed,
                "moves": r.passes,
                "wrote": write && r.changed,
                "error": r.error,
                "preview": if !write { r.preview.as_ref() } else { None },
                "diff": if diff && !write { build_line_diff(r.original.as_deref(), r.preview.as_deref()) } else { None }
            })
        })
        .collect();
    let summary = json!({
        "changed": results.iter().filter(|r| r.changed).count(),
        "failed": results.iter().filter(|r| r.error.is_some()).count(),
        "total": results.len(),
        "wrote": if write { results.iter().filter(|r| r.changed).count() } else { 0 },
    });
    json!({"results": items, "summary": summary})
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(file: &str, changed: bool) -> FormatResult {
        FormatResult {
            file: file.into(),
            changed,
            passes: if changed { 1 } else { 0 },
            preview: changed.then(|| "{\n  b,\n  a\n}".to_string()),
            original: Some("{\n  a,\n  b\n}".into()),
            error: None,
        }
    }

    #[test]
    fn test_compose_format_json_write_and_preview_diff() {
        let results = vec![result("a.js", true), result("b.js", false)];
        // write=false, diff=true: previews and diffs present for changed item
        let out = compose_format_json(&results, false, true);
        assert_eq!(out["summary"]["changed"], 1);
        assert_eq!(out["summary"]["wrote"], 0);
        assert!(out["results"][0]["preview"].is_string());
        assert!(out["results"][0]["diff"].is_string());
        assert!(out["results"][1]["diff"].is_null());
        // write=true: no preview/diff, wrote equals changed
        let out2 = compose_format_json(&results, true, false);
        assert_eq!(out2["summary"]["wrote"], 1);
        assert!(out2["results"][0]["preview"].is_null());
        assert!(out2["results"][0]["diff"].is_null());
    }

    #[test]
    fn test_line_diff_shows_only_changed_lines() {
        let d = build_line_diff(Some("{\n  a,\n  b\n}"), Some("{\n  b,\n  a\n}")).unwrap();
        assert_eq!(d, "@@ line 2 @@\n-  a,\n-  b\n+  b,\n+  a\n");
    }

    #[test]
    fn test_compose_lint_json_shape() {
        let res = crate::models::LintResult {
            issues: vec![crate::models::Issue {
                file: "p.js".into(),
                rule: "order-in-components".into(),
                severity: "warn".into(),
                path: "component.store".into(),
                line: 4,
                column: 3,
                message: "msg".into(),
            }],
            summary: crate::models::Summary {
                errors: 0,
                warnings: 1,
                infos: 0,
                files: 1,
            },
        };
        let out = compose_lint_json(&res);
        assert_eq!(out["summary"]["warnings"], 1);
        assert_eq!(out["issues"][0]["path"], "component.store");
        assert_eq!(out["issues"][0]["line"], 4);
    }
}
