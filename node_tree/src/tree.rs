//! # Tree Arena
//!
//! Owns every node of one virtual tree and addresses them by [`NodeId`].
//! The root folder lives outside the id map so it always exists; everything
//! else hangs off it through owned child handles and non-owning parent
//! back-references.
//!
//! ## Design
//!
//! - Structural primitives (`insert`, `attach`, `remove_subtree`,
//!   `sort_children`) never touch timestamps; callers that perform a user
//!   mutation pair them with [`Tree::touch`]
//! - [`Tree::set_children`] is the one atomic structural mutator: it
//!   replaces the sequence, re-points back-references, and bumps the folder
//! - `path`, `size` and `find` recompute from the live structure on every
//!   call; nothing is cached across mutations

use std::collections::HashMap;

use crate::node::{FolderNode, Node, NodeId};
use crate::order::sibling_order;
use crate::path;

/// Arena of nodes forming one tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root_id: NodeId,
    root: Node,
    nodes: HashMap<NodeId, Node>,
}

impl Tree {
    /// Creates a tree whose root is an empty folder named `/`.
    pub fn new() -> Self {
        Self::with_root(FolderNode::new(path::SEPARATOR.to_string()))
    }

    /// Creates a tree around an explicit root folder.
    ///
    /// The folder's parent link is cleared; restore flows pass a childless
    /// folder here and [`Tree::attach`] descendants afterwards.
    pub fn with_root(root: FolderNode) -> Self {
        let mut root = Node::Folder(root);
        root.set_parent(None);
        Self {
            root_id: NodeId::new(),
            root,
            nodes: HashMap::new(),
        }
    }

    /// Handle of the root folder
    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// The root folder node
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of nodes in the tree, root included
    pub fn len(&self) -> usize {
        self.nodes.len() + 1
    }

    /// A tree always has at least its root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Looks up a node by handle
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id == self.root_id {
            Some(&self.root)
        } else {
            self.nodes.get(&id)
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id == self.root_id {
            Some(&mut self.root)
        } else {
            self.nodes.get_mut(&id)
        }
    }

    /// Child handles of a folder, in stored order
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.node(id)?.as_folder().map(FolderNode::children)
    }

    /// Adds a detached node to the arena and returns its handle.
    ///
    /// If the node is a folder with pre-listed children, each listed child
    /// already in the arena gets its parent back-reference pointed at the
    /// new folder (handles that resolve to nothing are ignored).
    pub fn insert(&mut self, node: impl Into<Node>) -> NodeId {
        let mut node = node.into();
        node.set_parent(None);
        let id = NodeId::new();
        if let Some(folder) = node.as_folder() {
            let listed: Vec<NodeId> = folder.children().to_vec();
            for child in listed {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.set_parent(Some(id));
                }
            }
        }
        self.nodes.insert(id, node);
        id
    }

    /// Appends `child` to `parent`'s children and re-points its
    /// back-reference. No timestamp changes.
    ///
    /// Refuses (returns false) when either handle is unknown, `parent` is
    /// not a folder, `child` is the root, or `child` is already listed.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> bool {
        if child == self.root_id || !self.nodes.contains_key(&child) {
            return false;
        }
        match self.node_mut(parent).and_then(Node::as_folder_mut) {
            Some(folder) => {
                if folder.children().contains(&child) {
                    return false;
                }
                folder.children_mut().push(child);
            }
            None => return false,
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.set_parent(Some(parent));
        }
        true
    }

    /// Atomically replaces a folder's children.
    ///
    /// Re-points every new child's back-reference to the folder, detaches
    /// children that dropped out of the sequence, and bumps the folder's
    /// `last_modified`. Returns false when `folder` is not a folder handle.
    pub fn set_children(&mut self, folder: NodeId, children: Vec<NodeId>) -> bool {
        let previous = match self.node_mut(folder).and_then(Node::as_folder_mut) {
            Some(node) => std::mem::replace(node.children_mut(), children.clone()),
            None => return false,
        };
        for dropped in previous {
            if !children.contains(&dropped) {
                if let Some(node) = self.nodes.get_mut(&dropped) {
                    node.set_parent(None);
                }
            }
        }
        for child in children {
            if let Some(node) = self.nodes.get_mut(&child) {
                node.set_parent(Some(folder));
            }
        }
        if let Some(node) = self.node_mut(folder) {
            node.touch();
        }
        true
    }

    /// Removes a node and its entire owned subtree from the tree.
    ///
    /// The node is dropped from its parent's children and every descendant
    /// leaves the arena. The root cannot be removed. No timestamp changes.
    pub fn remove_subtree(&mut self, id: NodeId) -> bool {
        if id == self.root_id || !self.nodes.contains_key(&id) {
            return false;
        }
        let parent = self.nodes.get(&id).and_then(Node::parent);
        if let Some(parent) = parent {
            if let Some(folder) = self.node_mut(parent).and_then(Node::as_folder_mut) {
                folder.children_mut().retain(|child| *child != id);
            }
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                if let Some(folder) = node.as_folder() {
                    pending.extend_from_slice(folder.children());
                }
            }
        }
        true
    }

    /// Sorts a folder's children in place: folders first, then by name.
    ///
    /// Stable and timestamp-neutral; normalization, not a mutation.
    pub fn sort_children(&mut self, folder: NodeId) -> bool {
        let mut children = match self.node_mut(folder).and_then(Node::as_folder_mut) {
            Some(node) => std::mem::take(node.children_mut()),
            None => return false,
        };
        children.sort_by(|a, b| match (self.node(*a), self.node(*b)) {
            (Some(left), Some(right)) => sibling_order(left, right),
            _ => std::cmp::Ordering::Equal,
        });
        if let Some(node) = self.node_mut(folder).and_then(Node::as_folder_mut) {
            *node.children_mut() = children;
        }
        true
    }

    /// Bumps a node's `last_modified` to now
    pub fn touch(&mut self, id: NodeId) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.touch();
                true
            }
            None => false,
        }
    }

    /// Renames a node and bumps its `last_modified`
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.set_name(name);
                true
            }
            None => false,
        }
    }

    /// Replaces a file's content and bumps its `last_modified`.
    ///
    /// Returns false when the handle is unknown or not a file.
    pub fn set_content(&mut self, id: NodeId, content: impl Into<String>) -> bool {
        match self.node_mut(id).and_then(Node::as_file_mut) {
            Some(file) => {
                file.set_content(content);
                true
            }
            None => false,
        }
    }

    /// Flips a folder's expand flag and bumps its `last_modified`.
    ///
    /// Returns false when the handle is unknown or not a folder.
    pub fn toggle_expand(&mut self, id: NodeId) -> bool {
        match self.node_mut(id).and_then(Node::as_folder_mut) {
            Some(folder) => {
                folder.toggle_expand();
                true
            }
            None => false,
        }
    }

    /// Sets a node's rename-in-progress flag and bumps its `last_modified`
    pub fn set_renaming(&mut self, id: NodeId, renaming: bool) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.set_renaming(renaming);
                true
            }
            None => false,
        }
    }

    /// Derives a node's absolute path by walking back-references to the root.
    pub fn path(&self, id: NodeId) -> Option<String> {
        let mut segments: Vec<&str> = Vec::new();
        let mut current = Some(id);
        while let Some(handle) = current {
            let node = self.node(handle)?;
            segments.push(node.name());
            current = node.parent();
        }
        segments.reverse();
        Some(path::join(&segments))
    }

    /// Derives a node's size: content bytes for files, recursive sum for
    /// folders.
    pub fn size(&self, id: NodeId) -> Option<u64> {
        match self.node(id)? {
            Node::File(file) => Some(file.size()),
            Node::Folder(folder) => folder
                .children()
                .iter()
                .map(|child| self.size(*child))
                .sum(),
        }
    }

    /// Finds the node whose derived path equals `target`, searching the
    /// whole tree (the root matches its own path).
    pub fn find(&self, target: &str) -> Option<NodeId> {
        self.find_from(self.root_id, target)
    }

    /// Depth-first search for `target` starting at `start` (inclusive).
    ///
    /// Paths are recomputed during the walk; the first match in stored
    /// child order wins.
    pub fn find_from(&self, start: NodeId, target: &str) -> Option<NodeId> {
        if self.path(start)? == target {
            return Some(start);
        }
        if let Node::Folder(folder) = self.node(start)? {
            for child in folder.children() {
                if let Some(found) = self.find_from(*child, target) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Handle of the direct child of `folder` carrying `name`, if any
    pub fn child_named(&self, folder: NodeId, name: &str) -> Option<NodeId> {
        let children = self.children(folder)?;
        children
            .iter()
            .copied()
            .find(|child| self.node(*child).is_some_and(|node| node.name() == name))
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
