//! Declaration dump schema: what a JavaScript front end hands to ordlint.
//!
//! A dump describes one source file: its imports, and every component-like
//! declaration in it with byte spans for each member. Parsing and shape
//! detection happen upstream; the dump is trusted for both.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
/// Half-open byte range into the source text.
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn shifted(self, delta: isize) -> Span {
        Span {
            start: self.start.wrapping_add_signed(delta),
            end: self.end.wrapping_add_signed(delta),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// One file's worth of analysis input.
pub struct SourceDump {
    /// Source path, relative to the dump file when not absolute.
    pub path: String,
    /// Inline source; when absent the file at `path` is read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub imports: Vec<Import>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Import {
    /// Module specifier, e.g. `@ember/service`.
    pub source: String,
    /// Local name of the default import, if any.
    #[serde(default)]
    pub default: Option<String>,
    /// Local name of a namespace import (`import * as x`), if any.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub specifiers: Vec<ImportSpecifier>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// Native class body; members are separated by whitespace only.
    Class,
    /// Object literal passed to a component factory; members are
    /// comma-separated.
    Object,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Declaration {
    /// Human label for messages: the declared name, or kind and offset.
    pub fn label(&self) -> String {
        match (&self.name, self.span) {
            (Some(n), _) => n.clone(),
            (None, Some(s)) => format!("{:?}@{}", self.kind, s.start).to_lowercase(),
            (None, None) => format!("{:?}", self.kind).to_lowercase(),
        }
    }

    /// Offset used to process declarations innermost/last first.
    pub fn start(&self) -> usize {
        self.span
            .map(|s| s.start)
            .or_else(|| self.members.first().map(Member::full_start))
            .unwrap_or(0)
    }

    /// Check that member spans lie within `source`, sit on char boundaries,
    /// and appear in ascending, non-overlapping order.
    pub fn check_spans(&self, source: &str) -> Result<()> {
        check_member_spans(&self.members, source)
    }
}

fn check_member_spans(members: &[Member], source: &str) -> Result<()> {
    let mut prev_end = 0usize;
    for m in members {
        let start = m.full_start();
        let end = m.span.end;
        let fail = |reason: &'static str| Error::InvalidSpan {
            member: m.display_name(),
            start,
            end,
            reason,
        };
        if m.span.end < m.span.start {
            return Err(fail("end precedes start"));
        }
        if end > source.len() {
            return Err(fail("span runs past end of source"));
        }
        if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            return Err(fail("span splits a character"));
        }
        if start < prev_end {
            return Err(fail("span overlaps previous member"));
        }
        prev_end = end;
        if let MemberKind::Property {
            value: Some(Expr::Object { members }),
            ..
        } = &m.kind
        {
            check_member_spans(members, source)?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Member {
    /// The member itself, including a trailing `;` for class fields but not
    /// the `,` separating object properties.
    pub span: Span,
    /// Start of leading comments or decorators that travel with the member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leading: Option<usize>,
    /// Decorator names as written, without `@` or arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
    #[serde(flatten)]
    pub kind: MemberKind,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberKind {
    /// `...Mixin`
    Spread,
    /// `key: value` in an object literal, or a class field.
    Property {
        key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Expr>,
    },
    /// Method shorthand or class method. `statements` is absent when the
    /// method has no body at all.
    Method {
        key: String,
        #[serde(default)]
        statements: Option<usize>,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expr {
    /// Call expression; `callee` is a dotted path such as `Ember.inject.service`.
    Call { callee: String },
    /// Function or arrow function expression.
    Function {
        #[serde(default)]
        statements: Option<usize>,
    },
    Object {
        #[serde(default)]
        members: Vec<Member>,
    },
    #[serde(other)]
    Other,
}

impl Member {
    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            MemberKind::Spread => None,
            MemberKind::Property { key, .. } | MemberKind::Method { key, .. } => Some(key),
        }
    }

    pub fn display_name(&self) -> String {
        self.key().map(String::from).unwrap_or_else(|| "...".into())
    }

    /// Start of the text that moves with this member.
    pub fn full_start(&self) -> usize {
        self.leading
            .map(|l| l.min(self.span.start))
            .unwrap_or(self.span.start)
    }

    pub fn full_span(&self) -> Span {
        Span::new(self.full_start(), self.span.end)
    }

    /// Body statement count for method-like members: methods and properties
    /// holding a function expression. `Some(None)` is a method without body.
    pub fn function_body(&self) -> Option<Option<usize>> {
        match &self.kind {
            MemberKind::Method { statements, .. } => Some(*statements),
            MemberKind::Property {
                value: Some(Expr::Function { statements }),
                ..
            } => Some(*statements),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&Expr> {
        match &self.kind {
            MemberKind::Property { value, .. } => value.as_ref(),
            _ => None,
        }
    }

    /// Copy of this member with every offset moved by `delta`.
    pub(crate) fn shifted(&self, delta: isize) -> Member {
        let kind = match &self.kind {
            MemberKind::Property {
                key,
                value: Some(Expr::Object { members }),
            } => MemberKind::Property {
                key: key.clone(),
                value: Some(Expr::Object {
                    members: members.iter().map(|m| m.shifted(delta)).collect(),
                }),
            },
            other => other.clone(),
        };
        Member {
            span: self.span.shifted(delta),
            leading: self.leading.map(|l| l.wrapping_add_signed(delta)),
            decorators: self.decorators.clone(),
            kind,
        }
    }
}
