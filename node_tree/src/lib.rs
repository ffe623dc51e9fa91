//! # Node Tree
//!
//! This crate provides the virtual hierarchical node model behind the
//! editor workbench: an in-memory tree of files and folders with derived
//! paths, derived sizes, and deterministic sibling ordering.
//!
//! ## Philosophy
//!
//! - **Ownership points down**: a folder owns its children; the parent link
//!   is a non-owning back-reference used only for path derivation
//! - **Paths are derived, never stored**: a path is recomputed by walking
//!   back-references, so it can never drift from the tree shape
//! - **Two kinds, matched exhaustively**: files and folders are variants of
//!   one tagged union, not subclasses
//! - **Mutations leave a trace**: every scalar mutation bumps the node's
//!   `last_modified` timestamp
//!
//! ## Key Types
//!
//! - [`Tree`]: the arena owning all nodes of one tree
//! - [`Node`] / [`FileNode`] / [`FolderNode`]: the entities
//! - [`NodeId`]: non-owning handle into the arena
//! - [`NameError`]: why a candidate name was rejected

pub mod name;
pub mod node;
pub mod order;
pub mod path;
pub mod tree;

pub use name::{validate_name, NameError, DISALLOWED_CHARS, MAX_NAME_UNITS};
pub use node::{FileNode, FolderNode, Node, NodeId, NodeKind};
pub use order::sibling_order;
pub use tree::Tree;
