//! ordlint core library.
//!
//! This crate checks that members of component declarations (class bodies
//! and object literals passed to component factories) follow a configurable
//! category order, and computes text moves that fix them.
//!
//! High-level modules:
//! - `category`: Closed taxonomy of member categories.
//! - `normalize`: User order → ranked slots (lifecycle expansion, groups, aliasing).
//! - `alias`: Per-file table of imported injection/observer helpers.
//! - `classify`: Ordered rule list assigning one category per member.
//! - `validate`: First-violation search.
//! - `plan`: Fix planning as length-preserving text moves.
//! - `engine`: Per-declaration orchestration and the bounded fix loop.
//! - `lint` / `format`: File runners over declaration dumps.
//! - `config`, `cli`, `output`: Host surface for the binary.
pub mod alias;
pub mod category;
pub mod classify;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod lint;
pub mod models;
pub mod normalize;
pub mod output;
pub mod plan;
pub mod utils;
pub mod validate;

pub use engine::{Engine, Finding, FixOutcome};
pub use error::{Error, Result};
pub use normalize::{NormalizedOrder, OrderItem};
