//! Closed taxonomy of member categories.
//!
//! Every member of a component declaration is assigned exactly one of these.
//! The kebab/camel names are the ones users write in the `order` option.

use serde::{Serialize, Serializer};
use std::fmt;

/// Aggregate name that expands to every lifecycle hook.
pub const LIFECYCLE_HOOK: &str = "lifecycle-hook";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Spread,
    Service,
    Property,
    EmptyMethod,
    SingleLineFunction,
    MultiLineFunction,
    Observer,
    Constructor,
    Init,
    DidReceiveAttrs,
    WillRender,
    WillInsertElement,
    DidInsertElement,
    DidRender,
    DidUpdateAttrs,
    WillUpdate,
    DidUpdate,
    WillDestroy,
    WillDestroyElement,
    WillClearRender,
    DidDestroyElement,
    Action,
    Actions,
    Method,
}

impl Category {
    /// Built-in order, used when no `order` option is configured.
    pub const DEFAULT_ORDER: [Category; 24] = [
        Category::Spread,
        Category::Service,
        Category::Property,
        Category::EmptyMethod,
        Category::SingleLineFunction,
        Category::MultiLineFunction,
        Category::Observer,
        Category::Constructor,
        Category::Init,
        Category::DidReceiveAttrs,
        Category::WillRender,
        Category::WillInsertElement,
        Category::DidInsertElement,
        Category::DidRender,
        Category::DidUpdateAttrs,
        Category::WillUpdate,
        Category::DidUpdate,
        Category::WillDestroy,
        Category::WillDestroyElement,
        Category::WillClearRender,
        Category::DidDestroyElement,
        Category::Action,
        Category::Actions,
        Category::Method,
    ];

    /// Sub-sequence substituted for `lifecycle-hook`. Note that `init` comes
    /// before `constructor` here, unlike in the default order.
    pub const LIFECYCLE_HOOKS: [Category; 14] = [
        Category::Init,
        Category::Constructor,
        Category::DidReceiveAttrs,
        Category::WillRender,
        Category::WillInsertElement,
        Category::DidInsertElement,
        Category::DidRender,
        Category::DidUpdateAttrs,
        Category::WillUpdate,
        Category::DidUpdate,
        Category::WillDestroy,
        Category::WillDestroyElement,
        Category::WillClearRender,
        Category::DidDestroyElement,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Spread => "spread",
            Category::Service => "service",
            Category::Property => "property",
            Category::EmptyMethod => "empty-method",
            Category::SingleLineFunction => "single-line-function",
            Category::MultiLineFunction => "multi-line-function",
            Category::Observer => "observer",
            Category::Constructor => "constructor",
            Category::Init => "init",
            Category::DidReceiveAttrs => "didReceiveAttrs",
            Category::WillRender => "willRender",
            Category::WillInsertElement => "willInsertElement",
            Category::DidInsertElement => "didInsertElement",
            Category::DidRender => "didRender",
            Category::DidUpdateAttrs => "didUpdateAttrs",
            Category::WillUpdate => "willUpdate",
            Category::DidUpdate => "didUpdate",
            Category::WillDestroy => "willDestroy",
            Category::WillDestroyElement => "willDestroyElement",
            Category::WillClearRender => "willClearRender",
            Category::DidDestroyElement => "didDestroyElement",
            Category::Action => "action",
            Category::Actions => "actions",
            Category::Method => "method",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::DEFAULT_ORDER
            .iter()
            .copied()
            .find(|c| c.name() == name)
    }

    /// Lifecycle category for a member key, if the key names a hook.
    pub fn lifecycle_hook(key: &str) -> Option<Category> {
        Category::LIFECYCLE_HOOKS
            .iter()
            .copied()
            .find(|c| c.name() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
