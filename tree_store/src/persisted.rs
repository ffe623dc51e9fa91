//! Persisted tree representation
//!
//! The plain-data mirror of a live tree: recursively structured, carries
//! every field the tree needs to survive a reload, and serializes to the
//! JSON shape the store writes. Encoding is total; decoding bytes happens
//! in [`crate::schema`] and tree reconstruction lives here.
//!
//! The `parent` field records the owning folder's path for readers of the
//! stored JSON. Reconstruction ignores its value: back-references are
//! rebuilt from the nesting itself, so a stale `parent` string cannot
//! corrupt a reloaded tree.

use chrono::{DateTime, Utc};
use node_tree::{path, FileNode, FolderNode, Node, NodeId, Tree};
use serde::Serialize;

use crate::schema::SchemaError;

/// Persisted form of a file node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedFile {
    pub name: String,
    pub parent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub renaming: bool,
    pub content: String,
}

/// Persisted form of a folder node, children included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedFolder {
    pub name: String,
    pub parent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub renaming: bool,
    pub expand: bool,
    pub children: Vec<PersistedNode>,
}

/// One persisted node, tagged by kind.
///
/// Serializes with an inline `"type"` tag (`"file"` / `"folder"`), the
/// shape the explorer has always written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PersistedNode {
    File(PersistedFile),
    Folder(PersistedFolder),
}

impl PersistedNode {
    /// Encodes the whole tree, rooted at its root folder.
    pub fn from_tree(tree: &Tree) -> PersistedNode {
        encode(tree, tree.root(), None)
    }

    /// Encodes the subtree rooted at `id`, or `None` for an unknown handle.
    pub fn from_node(tree: &Tree, id: NodeId) -> Option<PersistedNode> {
        let node = tree.node(id)?;
        let parent = match node.parent() {
            Some(parent) => Some(tree.path(parent)?),
            None => None,
        };
        Some(encode(tree, node, parent))
    }

    /// The node's leaf name
    pub fn name(&self) -> &str {
        match self {
            PersistedNode::File(file) => &file.name,
            PersistedNode::Folder(folder) => &folder.name,
        }
    }

    /// Borrows the folder variant, if this is a folder
    pub fn as_folder(&self) -> Option<&PersistedFolder> {
        match self {
            PersistedNode::File(_) => None,
            PersistedNode::Folder(folder) => Some(folder),
        }
    }

    /// Borrows the file variant, if this is a file
    pub fn as_file(&self) -> Option<&PersistedFile> {
        match self {
            PersistedNode::File(file) => Some(file),
            PersistedNode::Folder(_) => None,
        }
    }
}

fn encode(tree: &Tree, node: &Node, parent: Option<String>) -> PersistedNode {
    match node {
        Node::File(file) => PersistedNode::File(PersistedFile {
            name: file.name().to_string(),
            parent,
            created_at: node.created_at(),
            last_modified: node.last_modified(),
            renaming: node.renaming(),
            content: file.content().to_string(),
        }),
        Node::Folder(folder) => {
            let own_path = match &parent {
                Some(parent) => path::join(&[parent, folder.name()]),
                None => path::join(&[folder.name()]),
            };
            let children = folder
                .children()
                .iter()
                .filter_map(|child| {
                    let child_node = tree.node(*child)?;
                    Some(encode(tree, child_node, Some(own_path.clone())))
                })
                .collect();
            PersistedNode::Folder(PersistedFolder {
                name: folder.name().to_string(),
                parent,
                created_at: node.created_at(),
                last_modified: node.last_modified(),
                renaming: node.renaming(),
                expand: folder.expand(),
                children,
            })
        }
    }
}

/// Rebuilds a live tree from its persisted form.
///
/// The persisted root must be a folder. Children are attached top-down,
/// which re-points every parent back-reference; stored timestamps and
/// flags are preserved exactly. A duplicate sibling name aborts the
/// reconstruction — no partially-valid tree ever escapes.
pub fn from_persisted(persisted: &PersistedNode) -> Result<Tree, SchemaError> {
    let folder = match persisted {
        PersistedNode::File(_) => return Err(SchemaError::RootNotFolder),
        PersistedNode::Folder(folder) => folder,
    };
    let mut tree = Tree::with_root(
        FolderNode::new(folder.name.clone())
            .with_expand(folder.expand)
            .with_renaming(folder.renaming)
            .with_timestamps(folder.created_at, folder.last_modified),
    );
    let root_id = tree.root_id();
    attach_children(&mut tree, root_id, &folder.children)?;
    Ok(tree)
}

fn attach_children(
    tree: &mut Tree,
    parent: NodeId,
    children: &[PersistedNode],
) -> Result<(), SchemaError> {
    for child in children {
        if tree.child_named(parent, child.name()).is_some() {
            return Err(SchemaError::DuplicateChild {
                folder: tree.path(parent).unwrap_or_default(),
                name: child.name().to_string(),
            });
        }
        match child {
            PersistedNode::File(file) => {
                let id = tree.insert(
                    FileNode::new(file.name.clone(), file.content.clone())
                        .with_renaming(file.renaming)
                        .with_timestamps(file.created_at, file.last_modified),
                );
                tree.attach(parent, id);
            }
            PersistedNode::Folder(folder) => {
                let id = tree.insert(
                    FolderNode::new(folder.name.clone())
                        .with_expand(folder.expand)
                        .with_renaming(folder.renaming)
                        .with_timestamps(folder.created_at, folder.last_modified),
                );
                tree.attach(parent, id);
                attach_children(tree, id, &folder.children)?;
            }
        }
    }
    Ok(())
}
