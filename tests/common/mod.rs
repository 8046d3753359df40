//! Builders for component sources with known member spans.

#![allow(dead_code)]

use ordlint::models::dump::{Declaration, DeclarationKind, Expr, Member, MemberKind, Span};

/// Member source text plus its shape.
pub struct Spec {
    pub text: String,
    pub kind: MemberKind,
}

pub fn prop(key: &str, value: &str) -> Spec {
    Spec {
        text: format!("{}: {}", key, value),
        kind: MemberKind::Property {
            key: key.into(),
            value: Some(Expr::Other),
        },
    }
}

pub fn call(key: &str, callee: &str) -> Spec {
    Spec {
        text: format!("{}: {}()", key, callee),
        kind: MemberKind::Property {
            key: key.into(),
            value: Some(Expr::Call {
                callee: callee.into(),
            }),
        },
    }
}

/// Method with `statements` one-line statements in its body.
pub fn method(key: &str, statements: usize) -> Spec {
    let body = if statements == 0 {
        "{}".to_string()
    } else {
        let lines: Vec<String> = (0..statements).map(|i| format!("    this.s{}();", i)).collect();
        format!("{{\n{}\n  }}", lines.join("\n"))
    };
    Spec {
        text: format!("{}() {}", key, body),
        kind: MemberKind::Method {
            key: key.into(),
            statements: Some(statements),
        },
    }
}

pub fn spread(name: &str) -> Spec {
    Spec {
        text: format!("...{}", name),
        kind: MemberKind::Spread,
    }
}

/// `Component.extend({ ... })` with one member per line and blank lines
/// between members.
pub fn object_component(specs: Vec<Spec>) -> (String, Declaration) {
    let mut source = String::from("export default Component.extend({\n");
    let mut members = Vec::new();
    let n = specs.len();
    for (i, spec) in specs.into_iter().enumerate() {
        source.push_str("  ");
        let start = source.len();
        source.push_str(&spec.text);
        members.push(Member {
            span: Span::new(start, source.len()),
            leading: None,
            decorators: Vec::new(),
            kind: spec.kind,
        });
        source.push_str(if i + 1 < n { ",\n\n" } else { ",\n" });
    }
    source.push_str("});\n");
    let decl = Declaration {
        kind: DeclarationKind::Object,
        name: Some("component".into()),
        span: None,
        members,
    };
    (source, decl)
}

/// Text of each member in source order.
pub fn member_texts(source: &str, decl: &Declaration) -> Vec<String> {
    decl.members
        .iter()
        .map(|m| source[m.span.start..m.span.end].to_string())
        .collect()
}
