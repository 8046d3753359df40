//! Member classification.
//!
//! Rules are tried top to bottom and the first one that returns a category
//! wins. Service and observer detection look at value shape, so they run
//! before the name-based lifecycle rule: `init: inject()` is a service.
//! Inside an `actions` map the remaining members are all `action`, even one
//! named like a hook. The last two rules cannot fail, which makes
//! classification total.

use crate::alias::AliasTable;
use crate::category::Category;
use crate::models::dump::{Expr, Member, MemberKind};
use serde::Serialize;

/// How deep nested `actions` maps are walked.
pub const MAX_ACTION_DEPTH: usize = 1;

const ACTION_DECORATOR: &str = "action";
const ACTIONS_KEY: &str = "actions";

#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub aliases: &'a AliasTable,
    /// Set while classifying the members of an `actions` map.
    pub in_action_map: bool,
}

type Rule = fn(&Member, &Context<'_>) -> Option<Category>;

const RULES: &[(&str, Rule)] = &[
    ("spread", spread),
    ("service", service),
    ("observer", observer),
    ("lifecycle-hook", lifecycle_hook),
    ("action", action),
    ("actions", actions),
    ("empty-method", empty_method),
    ("single-line-function", single_line_function),
    ("multi-line-function", multi_line_function),
    ("property", property),
    ("method", method),
];

#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedMember<'a> {
    #[serde(skip)]
    pub member: &'a Member,
    pub name: String,
    pub category: Category,
    /// Members of an `actions` map, each tagged `action`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<ClassifiedMember<'a>>,
}

/// Assign exactly one category to `member`.
pub fn classify(member: &Member, ctx: &Context<'_>) -> Category {
    RULES
        .iter()
        .find_map(|(_, rule)| rule(member, ctx))
        .unwrap_or(Category::Method)
}

/// Classify every member of a declaration body, walking `actions` maps.
pub fn classify_members<'a>(members: &'a [Member], aliases: &AliasTable) -> Vec<ClassifiedMember<'a>> {
    classify_at_depth(members, aliases, false, 0)
}

fn classify_at_depth<'a>(
    members: &'a [Member],
    aliases: &AliasTable,
    in_action_map: bool,
    depth: usize,
) -> Vec<ClassifiedMember<'a>> {
    let ctx = Context {
        aliases,
        in_action_map,
    };
    members
        .iter()
        .map(|m| {
            let category = classify(m, &ctx);
            let nested = match (category, action_map(m)) {
                (Category::Actions, Some(inner)) if depth < MAX_ACTION_DEPTH => {
                    classify_at_depth(inner, aliases, true, depth + 1)
                }
                _ => Vec::new(),
            };
            ClassifiedMember {
                member: m,
                name: m.display_name(),
                category,
                nested,
            }
        })
        .collect()
}

fn action_map(member: &Member) -> Option<&[Member]> {
    match &member.kind {
        MemberKind::Property {
            key,
            value: Some(Expr::Object { members }),
        } if key == ACTIONS_KEY => Some(members),
        _ => None,
    }
}

fn call_callee(member: &Member) -> Option<&str> {
    match member.value() {
        Some(Expr::Call { callee }) => Some(callee),
        _ => None,
    }
}

fn spread(member: &Member, _: &Context<'_>) -> Option<Category> {
    matches!(member.kind, MemberKind::Spread).then_some(Category::Spread)
}

fn service(member: &Member, ctx: &Context<'_>) -> Option<Category> {
    if !matches!(member.kind, MemberKind::Property { .. }) {
        return None;
    }
    let by_call = call_callee(member).is_some_and(|c| ctx.aliases.is_injection(c));
    let by_decorator = member
        .decorators
        .iter()
        .any(|d| ctx.aliases.is_injection_decorator(d));
    (by_call || by_decorator).then_some(Category::Service)
}

fn observer(member: &Member, ctx: &Context<'_>) -> Option<Category> {
    call_callee(member)
        .is_some_and(|c| ctx.aliases.is_observer(c))
        .then_some(Category::Observer)
}

fn lifecycle_hook(member: &Member, ctx: &Context<'_>) -> Option<Category> {
    if ctx.in_action_map {
        return None;
    }
    member.function_body()?;
    Category::lifecycle_hook(member.key()?)
}

fn actions(member: &Member, _: &Context<'_>) -> Option<Category> {
    action_map(member).map(|_| Category::Actions)
}

fn action(member: &Member, ctx: &Context<'_>) -> Option<Category> {
    let decorated = member.decorators.iter().any(|d| d == ACTION_DECORATOR);
    (ctx.in_action_map || decorated).then_some(Category::Action)
}

fn empty_method(member: &Member, _: &Context<'_>) -> Option<Category> {
    (member.function_body()? == Some(0)).then_some(Category::EmptyMethod)
}

fn single_line_function(member: &Member, _: &Context<'_>) -> Option<Category> {
    (member.function_body()? == Some(1)).then_some(Category::SingleLineFunction)
}

fn multi_line_function(member: &Member, _: &Context<'_>) -> Option<Category> {
    member
        .function_body()?
        .filter(|n| *n > 1)
        .map(|_| Category::MultiLineFunction)
}

fn property(member: &Member, _: &Context<'_>) -> Option<Category> {
    (matches!(member.kind, MemberKind::Property { .. }) && member.function_body().is_none())
        .then_some(Category::Property)
}

fn method(_: &Member, _: &Context<'_>) -> Option<Category> {
    Some(Category::Method)
}
