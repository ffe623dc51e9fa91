//! Node name validation
//!
//! Checks a candidate name against filesystem-safe-name rules before it is
//! allowed into a tree. Rules run in a fixed order and the first violation
//! wins, so the user always sees the most basic problem first. Error
//! messages are shown verbatim in the rename input of the explorer.
//!
//! Sibling-uniqueness is deliberately not checked here: it needs tree
//! context and belongs to the mutation layer.

use thiserror::Error;

use crate::node::NodeKind;

/// Longest accepted name, counted in UTF-16 code units.
pub const MAX_NAME_UNITS: usize = 255;

/// Characters that may never appear in a node name.
pub const DISALLOWED_CHARS: [char; 11] = ['/', '?', '*', '>', '<', '|', '"', '\'', '`', '\\', ':'];

/// A rejected node name, with the user-facing reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Name is the empty string
    #[error("{0} name cannot be empty")]
    Empty(NodeKind),

    /// Name exceeds [`MAX_NAME_UNITS`]
    #[error("{0} name too long")]
    TooLong(NodeKind),

    /// Name ends with a `.`
    #[error("{0} name cannot end with a dot")]
    TrailingDot(NodeKind),

    /// Name contains a character from [`DISALLOWED_CHARS`]
    #[error("{0} name cannot contain '{1}'")]
    DisallowedChar(NodeKind, char),
}

/// Validates a candidate node name.
///
/// Rules, in order, first violation wins: non-empty, at most
/// [`MAX_NAME_UNITS`] long, no trailing dot, none of the
/// [`DISALLOWED_CHARS`]. The reported disallowed character is the first
/// offending one in the name.
pub fn validate_name(name: &str, kind: NodeKind) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty(kind));
    }
    // UTF-16 code units, not bytes
    if name.encode_utf16().count() > MAX_NAME_UNITS {
        return Err(NameError::TooLong(kind));
    }
    if name.ends_with('.') {
        return Err(NameError::TrailingDot(kind));
    }
    if let Some(offending) = name.chars().find(|c| DISALLOWED_CHARS.contains(c)) {
        return Err(NameError::DisallowedChar(kind, offending));
    }
    Ok(())
}
