//! # Tree Store
//!
//! Validated mutation and persistence for explorer trees.
//!
//! ## Philosophy
//!
//! [`node_tree`] gives us honest structural primitives; this crate is where
//! policy lives. Every mutation goes through [`TreeStore`], which enforces
//! name validation, sibling uniqueness, canonical ordering, and the
//! modification-time bump rules in one place — callers cannot produce an
//! invalid tree through the store. Reads from storage are equally strict:
//! stored JSON is validated field by field, and anything malformed is
//! rejected whole rather than repaired.
//!
//! ## Key Types
//!
//! - [`TreeStore`]: the mutation surface; every edit yields a snapshot
//! - [`TreeSnapshot`]: frozen persisted state with a SHA-256 digest
//! - [`PersistedNode`]: the JSON shape trees are stored in
//! - [`TreeError`] / [`SchemaError`]: rejected edits and rejected bytes

pub mod persisted;
pub mod schema;
pub mod snapshot;
pub mod store;

pub use persisted::{from_persisted, PersistedFile, PersistedFolder, PersistedNode};
pub use schema::{decode_tree, SchemaError};
pub use snapshot::TreeSnapshot;
pub use store::{TreeError, TreeStore};
