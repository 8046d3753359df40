//! Alias table: which local identifiers denote framework capabilities.
//!
//! Built once per file from its imports. The first binding found for each
//! capability wins, mirroring how a module can only bind a name once.

use crate::models::dump::Import;
use serde::Serialize;

const EMBER: &str = "ember";
const SERVICE_MODULE: &str = "@ember/service";
const OBJECT_MODULE: &str = "@ember/object";
const CONTROLLER_MODULE: &str = "@ember/controller";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasTable {
    /// Default import of `ember` (usually `Ember`).
    pub ember: Option<String>,
    /// `inject` (or `service`) from `@ember/service`.
    pub inject: Option<String>,
    /// `observer` from `@ember/object`.
    pub observer: Option<String>,
    /// `inject` from `@ember/controller`.
    pub controller: Option<String>,
}

impl AliasTable {
    pub fn from_imports(imports: &[Import]) -> Self {
        let mut table = AliasTable::default();
        for imp in imports {
            match imp.source.as_str() {
                EMBER => {
                    fill(&mut table.ember, imp.default.as_deref());
                    fill(&mut table.ember, imp.namespace.as_deref());
                }
                SERVICE_MODULE => {
                    fill(&mut table.inject, named(imp, "inject"));
                    fill(&mut table.inject, named(imp, "service"));
                }
                OBJECT_MODULE => fill(&mut table.observer, named(imp, "observer")),
                CONTROLLER_MODULE => fill(&mut table.controller, named(imp, "inject")),
                _ => {}
            }
        }
        table
    }

    /// Whether a dotted callee path injects a service or controller.
    pub fn is_injection(&self, callee: &str) -> bool {
        let parts: Vec<&str> = callee.split('.').collect();
        match parts.as_slice() {
            [name] => is(&self.inject, name) || is(&self.controller, name),
            [ns, "inject", "service" | "controller"] => is(&self.ember, ns),
            _ => false,
        }
    }

    /// Whether a dotted callee path creates an observer.
    pub fn is_observer(&self, callee: &str) -> bool {
        let parts: Vec<&str> = callee.split('.').collect();
        match parts.as_slice() {
            [name] => is(&self.observer, name),
            [ns, "observer"] => is(&self.ember, ns),
            _ => false,
        }
    }

    /// Whether a class-field decorator injects a service or controller.
    pub fn is_injection_decorator(&self, decorator: &str) -> bool {
        self.is_injection(decorator)
    }
}

fn named<'a>(imp: &'a Import, imported: &str) -> Option<&'a str> {
    imp.specifiers
        .iter()
        .find(|s| s.imported == imported)
        .map(|s| s.local.as_str())
}

fn fill(slot: &mut Option<String>, local: Option<&str>) {
    if slot.is_none() {
        *slot = local.map(String::from);
    }
}

fn is(slot: &Option<String>, name: &str) -> bool {
    slot.as_deref() == Some(name)
}
