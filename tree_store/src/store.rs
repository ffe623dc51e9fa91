//! Tree mutation orchestration
//!
//! [`TreeStore`] owns one tree and funnels every mutation through
//! operations that enforce name validity, sibling uniqueness, and the
//! sibling ordering policy. Each successful mutation hands back a fresh
//! [`TreeSnapshot`] so consumers can detect changes by diffing instead of
//! watching shared state.

use node_tree::{validate_name, NameError, Node, NodeId, Tree};
use thiserror::Error;

use crate::snapshot::TreeSnapshot;

/// Errors surfaced by tree mutations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Candidate name failed validation
    #[error(transparent)]
    Validation(#[from] NameError),

    /// A sibling with the same name already exists
    #[error("{kind} name already exists")]
    DuplicateName {
        kind: node_tree::NodeKind,
        name: String,
    },

    /// The target path does not resolve for this operation
    #[error("not found: {0}")]
    NotFound(String),
}

/// Owns the tree and exposes its CRUD surface.
///
/// Paths are the external identity of nodes: every operation takes the
/// target's current derived path and re-resolves it against the live tree.
#[derive(Debug, Clone)]
pub struct TreeStore {
    tree: Tree,
}

impl TreeStore {
    /// Creates a store around an empty root folder `/`
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Wraps an existing tree, normalizing every folder's child order.
    ///
    /// Used after deserialization so consumers can keep assuming children
    /// are pre-sorted.
    pub fn from_tree(mut tree: Tree) -> Self {
        let mut pending = vec![tree.root_id()];
        while let Some(id) = pending.pop() {
            if tree.sort_children(id) {
                if let Some(children) = tree.children(id) {
                    pending.extend_from_slice(children);
                }
            }
        }
        Self { tree }
    }

    /// Read-only view of the owned tree
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Resolves a path to its node, if any
    pub fn get(&self, path: &str) -> Option<&Node> {
        let id = self.tree.find(path)?;
        self.tree.node(id)
    }

    /// Serializes the current state into an immutable snapshot
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot::capture(&self.tree)
    }

    /// Adds a detached node under the folder at `folder_path`.
    ///
    /// The name is validated, sibling uniqueness is enforced, the folder's
    /// children are re-sorted, and the folder's `last_modified` is bumped.
    /// Ancestors above the target folder are left untouched.
    pub fn add(&mut self, folder_path: &str, node: Node) -> Result<TreeSnapshot, TreeError> {
        validate_name(node.name(), node.kind())?;
        let target = self.resolve_folder(folder_path)?;
        if self.tree.child_named(target, node.name()).is_some() {
            return Err(TreeError::DuplicateName {
                kind: node.kind(),
                name: node.name().to_string(),
            });
        }
        let id = self.tree.insert(node);
        self.tree.attach(target, id);
        self.tree.sort_children(target);
        self.tree.touch(target);
        Ok(self.snapshot())
    }

    /// Removes the node at `path` and its whole subtree.
    ///
    /// Deletion is idempotent: a path that does not resolve is a no-op and
    /// still yields a snapshot. The ex-parent folder is bumped.
    pub fn remove(&mut self, path: &str) -> TreeSnapshot {
        if let Some(id) = self.tree.find(path) {
            let parent = self.tree.node(id).and_then(Node::parent);
            if self.tree.remove_subtree(id) {
                if let Some(parent) = parent {
                    self.tree.touch(parent);
                }
            }
        }
        self.snapshot()
    }

    /// Renames the node at `path` to `new_name`.
    ///
    /// Runs name validation, then checks uniqueness against the parent's
    /// other children (the node itself is excluded, so a rename to the
    /// current name is allowed). Derived paths of every descendant shift
    /// with the rename; callers keeping paths must re-resolve.
    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<TreeSnapshot, TreeError> {
        let id = self.resolve(path)?;
        let (kind, parent) = match self.tree.node(id) {
            Some(node) => (node.kind(), node.parent()),
            None => return Err(TreeError::NotFound(path.to_string())),
        };
        validate_name(new_name, kind)?;
        if let Some(parent) = parent {
            if let Some(existing) = self.tree.child_named(parent, new_name) {
                if existing != id {
                    return Err(TreeError::DuplicateName {
                        kind,
                        name: new_name.to_string(),
                    });
                }
            }
        }
        self.tree.set_name(id, new_name);
        if let Some(parent) = parent {
            // the sort key changed
            self.tree.sort_children(parent);
        }
        Ok(self.snapshot())
    }

    /// Replaces the content of the file at `path`
    pub fn set_content(&mut self, path: &str, content: &str) -> Result<TreeSnapshot, TreeError> {
        let id = self.resolve(path)?;
        if !self.tree.set_content(id, content) {
            return Err(TreeError::NotFound(path.to_string()));
        }
        Ok(self.snapshot())
    }

    /// Flips the expand flag of the folder at `path`
    pub fn toggle_expand(&mut self, path: &str) -> Result<TreeSnapshot, TreeError> {
        let id = self.resolve(path)?;
        if !self.tree.toggle_expand(id) {
            return Err(TreeError::NotFound(path.to_string()));
        }
        Ok(self.snapshot())
    }

    /// Sets the rename-in-progress flag of the node at `path`
    pub fn set_renaming(&mut self, path: &str, renaming: bool) -> Result<TreeSnapshot, TreeError> {
        let id = self.resolve(path)?;
        self.tree.set_renaming(id, renaming);
        Ok(self.snapshot())
    }

    fn resolve(&self, path: &str) -> Result<NodeId, TreeError> {
        self.tree
            .find(path)
            .ok_or_else(|| TreeError::NotFound(path.to_string()))
    }

    fn resolve_folder(&self, path: &str) -> Result<NodeId, TreeError> {
        let id = self.resolve(path)?;
        match self.tree.node(id) {
            Some(node) if node.is_folder() => Ok(id),
            _ => Err(TreeError::NotFound(path.to_string())),
        }
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}
