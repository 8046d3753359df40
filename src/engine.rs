//! Per-declaration orchestration: classify, validate, plan, and the bounded
//! fix loop.

use crate::alias::AliasTable;
use crate::category::Category;
use crate::classify::classify_members;
use crate::error::{Error, Result};
use crate::models::dump::Declaration;
use crate::normalize::NormalizedOrder;
use crate::plan::{plan_fix, MoveSet};
use crate::utils::line_col;
use crate::validate::{find_first_violation, Violation};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
/// The first order violation in one declaration, with its fix.
pub struct Finding {
    pub declaration: String,
    pub violation: Violation,
    pub member: String,
    pub category: Category,
    /// Member the offending one should be placed above.
    pub target: String,
    pub target_category: Category,
    pub line: usize,
    pub column: usize,
    pub target_line: usize,
    pub message: String,
    pub fix: MoveSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub source: String,
    /// Moves applied across all declarations.
    pub passes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    order: NormalizedOrder,
    max_passes: Option<usize>,
}

impl Engine {
    pub fn new(order: NormalizedOrder) -> Self {
        Engine {
            order,
            max_passes: None,
        }
    }

    /// Cap on fix passes per declaration. Without one, the member count is
    /// used: a body of N members never needs more than N-1 moves.
    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn order(&self) -> &NormalizedOrder {
        &self.order
    }

    /// Report the first violation in `decl`, if any.
    pub fn check(
        &self,
        source: &str,
        decl: &Declaration,
        aliases: &AliasTable,
    ) -> Result<Option<Finding>> {
        decl.check_spans(source)?;
        let classified = classify_members(&decl.members, aliases);
        let Some(violation) = find_first_violation(&classified, &self.order) else {
            return Ok(None);
        };
        let fix = plan_fix(violation, &classified, &self.order, source);
        let moving = &classified[violation.later];
        let target = &classified[fix.moves[0].before];
        let (line, column) = line_col(source, moving.member.span.start);
        let (target_line, _) = line_col(source, target.member.span.start);
        let message = format!(
            "The {} `{}` should be above the {} `{}` on line {}",
            moving.category, moving.name, target.category, target.name, target_line
        );
        debug!(
            declaration = %decl.label(),
            later = violation.later,
            earlier = violation.earlier,
            "{}",
            message
        );
        Ok(Some(Finding {
            declaration: decl.label(),
            violation,
            member: moving.name.clone(),
            category: moving.category,
            target: target.name.clone(),
            target_category: target.category,
            line,
            column,
            target_line,
            message,
            fix,
        }))
    }

    /// Check every declaration of a file.
    pub fn check_all(
        &self,
        source: &str,
        decls: &[Declaration],
        aliases: &AliasTable,
    ) -> Vec<Result<Option<Finding>>> {
        decls
            .iter()
            .map(|d| self.check(source, d, aliases))
            .collect()
    }

    /// Apply one move at a time until `decl` is ordered.
    ///
    /// Each pass re-classifies the permuted body before looking for the next
    /// violation. Running out of passes is an error, never a partial success.
    pub fn fix(&self, source: &str, decl: &Declaration, aliases: &AliasTable) -> Result<FixOutcome> {
        decl.check_spans(source)?;
        let cap = self.max_passes.unwrap_or(decl.members.len());
        let mut text = source.to_string();
        let mut current = decl.clone();
        let mut passes = 0usize;
        loop {
            let classified = classify_members(&current.members, aliases);
            let Some(violation) = find_first_violation(&classified, &self.order) else {
                return Ok(FixOutcome {
                    source: text,
                    passes,
                });
            };
            if passes >= cap {
                return Err(Error::FixDidNotConverge {
                    declaration: decl.label(),
                    passes,
                });
            }
            let set = plan_fix(violation, &classified, &self.order, &text);
            debug!(
                declaration = %decl.label(),
                pass = passes + 1,
                member = %classified[violation.later].name,
                "moving member"
            );
            let next = set.apply_to(&current);
            text = set.edit.apply(&text);
            current = next;
            passes += 1;
        }
    }

    /// Fix every declaration of a file, last one first. Edits never change
    /// length, so spans of the remaining declarations stay valid.
    pub fn fix_all(
        &self,
        source: &str,
        decls: &[Declaration],
        aliases: &AliasTable,
    ) -> Result<FixOutcome> {
        let mut idx: Vec<usize> = (0..decls.len()).collect();
        idx.sort_by(|a, b| decls[*b].start().cmp(&decls[*a].start()));
        let mut out = FixOutcome {
            source: source.to_string(),
            passes: 0,
        };
        for i in idx {
            let step = self.fix(&out.source, &decls[i], aliases)?;
            out.source = step.source;
            out.passes += step.passes;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dump::{DeclarationKind, Expr, Member, MemberKind, Span};

    fn meth(src: &str, key: &str, statements: usize) -> Member {
        let needle = format!("{}(", key);
        let start = src.find(&needle).unwrap();
        let end = start + src[start..].find('}').unwrap() + 1;
        Member {
            span: Span::new(start, end),
            leading: None,
            decorators: Vec::new(),
            kind: MemberKind::Method {
                key: key.into(),
                statements: Some(statements),
            },
        }
    }

    fn object(members: Vec<Member>) -> Declaration {
        Declaration {
            kind: DeclarationKind::Object,
            name: Some("my-component".into()),
            span: None,
            members,
        }
    }

    #[test]
    fn finding_names_member_and_target_line() {
        let src = "({\n  didInsertElement() {},\n  willInsertElement() {}\n})";
        let decl = object(vec![
            meth(src, "didInsertElement", 0),
            meth(src, "willInsertElement", 0),
        ]);
        let engine = Engine::default();
        let f = engine
            .check(src, &decl, &AliasTable::default())
            .unwrap()
            .unwrap();
        assert_eq!(f.member, "willInsertElement");
        assert_eq!(f.target, "didInsertElement");
        assert_eq!((f.line, f.column), (3, 3));
        assert_eq!(
            f.message,
            "The willInsertElement `willInsertElement` should be above the didInsertElement `didInsertElement` on line 2"
        );
    }

    #[test]
    fn fix_loop_converges_and_is_idempotent() {
        let src = "({ c() {}, b() { x; y; }, a() { x; } })";
        let decl = object(vec![meth(src, "c", 0), meth(src, "b", 2), meth(src, "a", 1)]);
        let engine = Engine::new(NormalizedOrder::new(Some(
            &["multi-line-function", "single-line-function", "empty-method"][..],
        )));
        let out = engine.fix(src, &decl, &AliasTable::default()).unwrap();
        assert_eq!(out.source, "({ b() { x; y; }, a() { x; }, c() {} })");
        assert_eq!(out.passes, 2);
    }

    #[test]
    fn sorted_body_is_left_untouched() {
        let src = "({ a() {}, b() { x; } })";
        let decl = object(vec![meth(src, "a", 0), meth(src, "b", 1)]);
        let engine = Engine::default();
        assert!(engine.check(src, &decl, &AliasTable::default()).unwrap().is_none());
        let out = engine.fix(src, &decl, &AliasTable::default()).unwrap();
        assert_eq!(out, FixOutcome { source: src.to_string(), passes: 0 });
    }

    #[test]
    fn exceeding_the_cap_is_reported() {
        let src = "({ c() {}, b() { x; y; }, a() { x; } })";
        let decl = object(vec![meth(src, "c", 0), meth(src, "b", 2), meth(src, "a", 1)]);
        let engine = Engine::new(NormalizedOrder::new(Some(
            &["multi-line-function", "single-line-function", "empty-method"][..],
        )))
        .with_max_passes(Some(1));
        let err = engine.fix(src, &decl, &AliasTable::default()).unwrap_err();
        assert!(matches!(err, Error::FixDidNotConverge { passes: 1, .. }));
    }

    #[test]
    fn fix_all_handles_several_declarations() {
        let src = "A({ b() { x; }, a() {} }); B({ d() { x; }, c() {} });";
        let first = object(vec![meth(src, "b", 1), meth(src, "a", 0)]);
        let second = object(vec![meth(src, "d", 1), meth(src, "c", 0)]);
        let engine = Engine::default();
        let out = engine
            .fix_all(src, &[first, second], &AliasTable::default())
            .unwrap();
        assert_eq!(out.source, "A({ a() {}, b() { x; } }); B({ c() {}, d() { x; } });");
        assert_eq!(out.passes, 2);
    }

    #[test]
    fn bad_spans_surface_as_errors() {
        let decl = object(vec![Member {
            span: Span::new(0, 50),
            leading: None,
            decorators: Vec::new(),
            kind: MemberKind::Property {
                key: "x".into(),
                value: Some(Expr::Other),
            },
        }]);
        let err = Engine::default()
            .check("short", &decl, &AliasTable::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSpan { .. }));
    }
}
