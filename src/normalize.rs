//! Order normalization.
//!
//! Turns the configured `order` option (or the built-in default) into a
//! ranking of slots: `lifecycle-hook` is expanded in place, `empty-method` is
//! slotted in front of `method` for configurations written before it existed,
//! and duplicates are dropped keeping the first occurrence. A group of names
//! is one slot, so its categories share a rank. Unknown names and entries
//! that are not names at all keep their slot but can never match a member.

use crate::category::{Category, LIFECYCLE_HOOK};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// One `order` item as written in configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OrderItem {
    Name(String),
    /// Categories sharing one rank.
    Group(Vec<String>),
    /// Anything else (numbers, tables, mixed lists); degrades to an unknown slot.
    Invalid(serde_json::Value),
}

impl OrderItem {
    fn mentions(&self, name: &str) -> bool {
        match self {
            OrderItem::Name(n) => n == name,
            OrderItem::Group(g) => g.iter().any(|n| n == name),
            OrderItem::Invalid(_) => false,
        }
    }
}

impl From<&str> for OrderItem {
    fn from(name: &str) -> Self {
        OrderItem::Name(name.to_string())
    }
}

/// One slot of the normalized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OrderEntry {
    Known(Category),
    Unknown(String),
    /// Holds only `Known` and `Unknown` entries.
    Group(Vec<OrderEntry>),
}

impl OrderEntry {
    fn covers(&self, category: Category) -> bool {
        match self {
            OrderEntry::Known(c) => *c == category,
            OrderEntry::Unknown(_) => false,
            OrderEntry::Group(g) => g.iter().any(|e| e.covers(category)),
        }
    }
}

impl fmt::Display for OrderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderEntry::Known(c) => f.write_str(c.name()),
            OrderEntry::Unknown(s) => f.write_str(s),
            OrderEntry::Group(g) => {
                let names: Vec<String> = g.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}

/// Position of a category in the normalized order.
///
/// `Unranked` sorts after every position: a category the user never listed
/// may appear anywhere, but everything ranked that follows it is out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Rank {
    At(usize),
    Unranked,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::At(i) => write!(f, "{}", i),
            Rank::Unranked => f.write_str("unranked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedOrder {
    entries: Vec<OrderEntry>,
}

impl Default for NormalizedOrder {
    fn default() -> Self {
        NormalizedOrder {
            entries: Category::DEFAULT_ORDER
                .iter()
                .copied()
                .map(OrderEntry::Known)
                .collect(),
        }
    }
}

impl NormalizedOrder {
    /// Normalize a flat list of names; `None` selects the default.
    pub fn new<S: AsRef<str>>(user: Option<&[S]>) -> Self {
        let items: Option<Vec<OrderItem>> =
            user.map(|u| u.iter().map(|s| OrderItem::from(s.as_ref())).collect());
        NormalizedOrder::from_items(items.as_deref())
    }

    /// Normalize configured items, groups included; `None` selects the default.
    pub fn from_items(user: Option<&[OrderItem]>) -> Self {
        let user = match user {
            None => return NormalizedOrder::default(),
            Some(u) if u.is_empty() => {
                warn!("empty `order` option; falling back to the default order");
                return NormalizedOrder::default();
            }
            Some(u) => u,
        };
        let items = add_backwards_position(
            user,
            Category::EmptyMethod.name(),
            Category::Method.name(),
        );

        let mut b = Builder::default();
        for item in &items {
            match item {
                OrderItem::Name(name) => {
                    for entry in b.resolve(name) {
                        b.entries.push(entry);
                    }
                }
                OrderItem::Group(names) => {
                    let mut group: Vec<OrderEntry> =
                        names.iter().flat_map(|n| b.resolve(n)).collect();
                    match group.len() {
                        0 => {}
                        1 => b.entries.extend(group.pop()),
                        _ => b.entries.push(OrderEntry::Group(group)),
                    }
                }
                OrderItem::Invalid(value) => {
                    let text = value.to_string();
                    warn!("invalid `order` entry {}; it will match no member", text);
                    if let Some(entry) = b.admit(OrderEntry::Unknown(text)) {
                        b.entries.push(entry);
                    }
                }
            }
        }
        NormalizedOrder { entries: b.entries }
    }

    /// Slots in rank order.
    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    pub fn rank(&self, category: Category) -> Rank {
        self.entries
            .iter()
            .position(|e| e.covers(category))
            .map(Rank::At)
            .unwrap_or(Rank::Unranked)
    }

    /// Display name of each slot; groups render as `[a, b]`.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }
}

#[derive(Default)]
struct Builder {
    entries: Vec<OrderEntry>,
    seen: Vec<OrderEntry>,
    expanded: bool,
}

impl Builder {
    /// Entries a single name contributes, duplicates removed.
    fn resolve(&mut self, name: &str) -> Vec<OrderEntry> {
        if name == LIFECYCLE_HOOK {
            if self.expanded {
                warn!("`{}` listed more than once; ignoring repeat", LIFECYCLE_HOOK);
                return Vec::new();
            }
            self.expanded = true;
            return Category::LIFECYCLE_HOOKS
                .iter()
                .copied()
                .filter_map(|hook| self.admit(OrderEntry::Known(hook)))
                .collect();
        }
        let entry = match Category::from_name(name) {
            Some(c) => OrderEntry::Known(c),
            None => {
                warn!("unknown category `{}` in `order`; it will match no member", name);
                OrderEntry::Unknown(name.to_string())
            }
        };
        self.admit(entry).into_iter().collect()
    }

    fn admit(&mut self, entry: OrderEntry) -> Option<OrderEntry> {
        if self.seen.contains(&entry) {
            warn!("duplicate category `{}` in `order`; keeping first position", entry);
            return None;
        }
        self.seen.push(entry.clone());
        Some(entry)
    }
}

/// Insert `legacy` right before `anchor` when the user listed `anchor` but
/// not `legacy`. An anchor inside a group pulls `legacy` into that group.
fn add_backwards_position(items: &[OrderItem], legacy: &str, anchor: &str) -> Vec<OrderItem> {
    if items.iter().any(|i| i.mentions(legacy)) {
        return items.to_vec();
    }
    let mut out = Vec::with_capacity(items.len() + 1);
    let mut inserted = false;
    for item in items {
        if inserted || !item.mentions(anchor) {
            out.push(item.clone());
            continue;
        }
        inserted = true;
        match item {
            OrderItem::Group(g) => {
                let mut g = g.clone();
                let at = g.iter().position(|n| n == anchor).unwrap_or(0);
                g.insert(at, legacy.to_string());
                out.push(OrderItem::Group(g));
            }
            _ => {
                out.push(OrderItem::from(legacy));
                out.push(item.clone());
            }
        }
    }
    out
}
