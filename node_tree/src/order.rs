//! Sibling ordering policy
//!
//! One total order over siblings, applied by the mutation layer after every
//! structural change: folders sort before files, ties within a kind break
//! on a case-sensitive lexicographic comparison of the name. Deterministic,
//! so repeated reads of an unmutated folder always agree.

use std::cmp::Ordering;

use crate::node::{Node, NodeKind};

/// Compares two siblings: folders first, then by name.
pub fn sibling_order(a: &Node, b: &Node) -> Ordering {
    match (a.kind(), b.kind()) {
        (NodeKind::Folder, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Folder) => Ordering::Greater,
        (NodeKind::File, NodeKind::File) | (NodeKind::Folder, NodeKind::Folder) => {
            a.name().cmp(b.name())
        }
    }
}
