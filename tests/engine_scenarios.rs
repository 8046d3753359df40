//! End-to-end scenarios for order checking and fixing.

mod common;

use common::*;
use ordlint::alias::AliasTable;
use ordlint::category::Category;
use ordlint::models::dump::{Import, ImportSpecifier};
use ordlint::normalize::OrderItem;
use ordlint::{Engine, NormalizedOrder};
use pretty_assertions::assert_eq;

fn service_aliases(local: &str) -> AliasTable {
    AliasTable::from_imports(&[Import {
        source: "@ember/service".into(),
        default: None,
        namespace: None,
        specifiers: vec![ImportSpecifier {
            imported: "inject".into(),
            local: local.into(),
        }],
    }])
}

#[test]
fn backward_alias_places_empty_method_before_method() {
    let order = NormalizedOrder::new(Some(&["property", "method"][..]));
    assert_eq!(order.names(), ["property", "empty-method", "method"]);
    let engine = Engine::new(order);
    let aliases = AliasTable::default();

    let (src, decl) = object_component(vec![method("reset", 0), method("save", 1)]);
    assert!(engine.check(&src, &decl, &aliases).unwrap().is_none());

    let (src, decl) = object_component(vec![method("save", 1), method("reset", 0)]);
    let finding = engine.check(&src, &decl, &aliases).unwrap().unwrap();
    assert_eq!(finding.member, "reset");
    assert_eq!(finding.category, Category::EmptyMethod);
    assert_eq!(finding.target, "save");
}

#[test]
fn lifecycle_hooks_follow_expanded_order() {
    let engine = Engine::new(NormalizedOrder::new(Some(
        &["property", "lifecycle-hook", "method"][..],
    )));
    let aliases = AliasTable::default();
    let (src, decl) = object_component(vec![
        prop("size", "1"),
        method("didInsertElement", 2),
        method("willInsertElement", 1),
    ]);

    let finding = engine.check(&src, &decl, &aliases).unwrap().unwrap();
    assert_eq!(finding.member, "willInsertElement");
    assert_eq!(finding.target, "didInsertElement");

    let fixed = engine.fix(&src, &decl, &aliases).unwrap();
    assert_eq!(fixed.passes, 1);
    let will = fixed.source.find("willInsertElement()").unwrap();
    let did = fixed.source.find("didInsertElement()").unwrap();
    assert!(will < did);
    let between = &fixed.source[will..did];
    assert!(between.ends_with("},\n\n  "), "did should directly follow will: {:?}", between);
}

#[test]
fn service_moves_to_top() {
    let engine = Engine::new(NormalizedOrder::default());
    let aliases = service_aliases("bar");
    let (src, decl) = object_component(vec![prop("foo", "1"), call("store", "bar")]);

    let finding = engine.check(&src, &decl, &aliases).unwrap().unwrap();
    assert_eq!(finding.category, Category::Service);
    assert_eq!(finding.target_category, Category::Property);
    assert_eq!(
        finding.message,
        "The service `store` should be above the property `foo` on line 2"
    );

    let fixed = engine.fix(&src, &decl, &aliases).unwrap();
    assert_eq!(
        fixed.source,
        "export default Component.extend({\n  store: bar(),\n\n  foo: 1,\n});\n"
    );
}

#[test]
fn injection_helper_without_import_is_a_property() {
    let engine = Engine::new(NormalizedOrder::default());
    let (src, decl) = object_component(vec![prop("foo", "1"), call("store", "bar")]);
    assert!(engine
        .check(&src, &decl, &AliasTable::default())
        .unwrap()
        .is_none());
}

#[test]
fn same_category_members_keep_relative_order() {
    let engine = Engine::new(NormalizedOrder::default());
    let aliases = service_aliases("service");
    let (src, decl) = object_component(vec![
        prop("b", "2"),
        prop("a", "1"),
        call("store", "service"),
        prop("c", "3"),
        call("session", "service"),
    ]);
    let fixed = engine.fix(&src, &decl, &aliases).unwrap();
    let order: Vec<&str> = ["store", "session", "b: 2", "a: 1", "c: 3"].to_vec();
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| fixed.source.find(needle).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn fixed_body_is_stable() {
    let engine = Engine::new(NormalizedOrder::default());
    let aliases = service_aliases("service");
    let (src, decl) = object_component(vec![
        method("didRender", 2),
        spread("Mixin"),
        prop("a", "1"),
        method("init", 3),
        call("store", "service"),
    ]);
    let once = engine.fix(&src, &decl, &aliases).unwrap();
    assert!(once.passes > 0);
    assert!(once.passes < decl.members.len());

    // Re-derive spans from the fixed text, as a front end re-parsing it would.
    let mut reparsed = decl.clone();
    for m in reparsed.members.iter_mut() {
        let text = &src[m.span.start..m.span.end];
        let start = once.source.find(text).unwrap();
        m.span.end = start + text.len();
        m.span.start = start;
    }
    reparsed.members.sort_by_key(|m| m.span.start);
    let again = engine.fix(&once.source, &reparsed, &aliases).unwrap();
    assert_eq!(again.passes, 0);
    assert_eq!(again.source, once.source);
}

#[test]
fn value_shape_takes_precedence_over_hook_name() {
    let engine = Engine::new(NormalizedOrder::default());
    let aliases = service_aliases("service");
    let (src, decl) = object_component(vec![prop("a", "1"), call("init", "service")]);
    let finding = engine.check(&src, &decl, &aliases).unwrap().unwrap();
    assert_eq!(finding.category, Category::Service);
}

#[test]
fn unknown_category_blocks_later_members() {
    let engine = Engine::new(NormalizedOrder::new(Some(&["bogus", "property"][..])));
    let aliases = AliasTable::default();
    let (src, decl) = object_component(vec![method("go", 1), prop("a", "1")]);
    let finding = engine.check(&src, &decl, &aliases).unwrap().unwrap();
    assert_eq!(finding.member, "a");
    let fixed = engine.fix(&src, &decl, &aliases).unwrap();
    assert!(fixed.source.find("a: 1").unwrap() < fixed.source.find("go()").unwrap());
}

#[test]
fn grouped_categories_never_violate_each_other() {
    let order = NormalizedOrder::from_items(Some(&[
        OrderItem::Group(vec!["service".into(), "property".into()]),
        OrderItem::from("method"),
    ]));
    let engine = Engine::new(order);
    let aliases = service_aliases("service");
    let (src, decl) = object_component(vec![
        prop("a", "1"),
        call("store", "service"),
        prop("b", "2"),
        call("session", "service"),
    ]);
    assert!(engine.check(&src, &decl, &aliases).unwrap().is_none());
    let fixed = engine.fix(&src, &decl, &aliases).unwrap();
    assert_eq!(fixed.passes, 0);
    assert_eq!(fixed.source, src);

    let (src, decl) = object_component(vec![
        method("go", 3),
        prop("a", "1"),
        call("store", "service"),
    ]);
    let finding = engine.check(&src, &decl, &aliases).unwrap().unwrap();
    assert_eq!(finding.member, "a");
    let fixed = engine.fix(&src, &decl, &aliases).unwrap();
    assert_eq!(fixed.passes, 2);
    let a = fixed.source.find("a: 1").unwrap();
    let store = fixed.source.find("store: service()").unwrap();
    let go = fixed.source.find("go()").unwrap();
    assert!(a < store && store < go);
}
