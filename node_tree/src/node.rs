//! # Node Entities
//!
//! The two node kinds of the virtual tree: files carry text content,
//! folders carry an ordered sequence of children. Nodes are addressed by
//! [`NodeId`] handles; the owning arena lives in [`crate::tree`].
//!
//! ## Design
//!
//! - Ownership points down: a folder's `children` holds the handles it owns
//! - The parent link is a non-owning back-reference used only for path
//!   derivation, never for lifetime
//! - `path` and `size` are derived on demand, never stored
//! - Every scalar mutation (`name`, `content`, `expand`, `renaming`) bumps
//!   `last_modified`; re-pointing a parent back-reference does not

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Unique handle for a node within a tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a new random node id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a node id from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two node kinds.
///
/// Renders lowercase (`file` / `folder`) because the display form is used
/// verbatim inside validation messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Folder,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::File => write!(f, "file"),
            NodeKind::Folder => write!(f, "folder"),
        }
    }
}

/// A file: a named leaf carrying a text payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    name: String,
    content: String,
    parent: Option<NodeId>,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    renaming: bool,
}

impl FileNode {
    /// Creates a detached file with the given name and content.
    ///
    /// Both timestamps start at the construction instant.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            content: content.into(),
            parent: None,
            created_at: now,
            last_modified: now,
            renaming: false,
        }
    }

    /// Overrides both timestamps (used when restoring a persisted node)
    pub fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        self.created_at = created_at;
        self.last_modified = last_modified;
        self
    }

    /// Overrides the rename-in-progress flag (used when restoring)
    pub fn with_renaming(mut self, renaming: bool) -> Self {
        self.renaming = renaming;
        self
    }

    /// Returns the file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the text content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Size in bytes of the UTF-8 encoded content
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Replaces the content and bumps `last_modified`
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.last_modified = Utc::now();
    }
}

/// A folder: a named interior node owning an ordered sequence of children.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderNode {
    name: String,
    children: Vec<NodeId>,
    expand: bool,
    parent: Option<NodeId>,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    renaming: bool,
}

impl FolderNode {
    /// Creates a detached, childless, collapsed folder.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            children: Vec::new(),
            expand: false,
            parent: None,
            created_at: now,
            last_modified: now,
            renaming: false,
        }
    }

    /// Pre-lists children on a folder that is about to enter a tree.
    ///
    /// [`crate::tree::Tree::insert`] re-points each listed child's parent
    /// back-reference when the folder joins the arena.
    pub fn with_children(mut self, children: Vec<NodeId>) -> Self {
        self.children = children;
        self
    }

    /// Overrides the expand flag (used when restoring a persisted node)
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Overrides both timestamps (used when restoring a persisted node)
    pub fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        self.created_at = created_at;
        self.last_modified = last_modified;
        self
    }

    /// Overrides the rename-in-progress flag (used when restoring)
    pub fn with_renaming(mut self, renaming: bool) -> Self {
        self.renaming = renaming;
        self
    }

    /// Returns the folder name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handles of the owned children, in stored order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the folder is expanded in the explorer
    pub fn expand(&self) -> bool {
        self.expand
    }

    /// Sets the expand flag and bumps `last_modified`
    pub fn set_expand(&mut self, expand: bool) {
        self.expand = expand;
        self.last_modified = Utc::now();
    }

    /// Flips the expand flag and bumps `last_modified`
    pub fn toggle_expand(&mut self) {
        self.expand = !self.expand;
        self.last_modified = Utc::now();
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }
}

/// A node in the virtual tree: either a file or a folder.
///
/// Shared fields are reached through the accessors below; kind-specific
/// state is reached by matching or via [`Node::as_file`] / [`Node::as_folder`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl Node {
    /// Creates a detached file node
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Node::File(FileNode::new(name, content))
    }

    /// Creates a detached folder node
    pub fn folder(name: impl Into<String>) -> Self {
        Node::Folder(FolderNode::new(name))
    }

    /// The node's kind
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Folder(_) => NodeKind::Folder,
        }
    }

    /// The leaf name
    pub fn name(&self) -> &str {
        match self {
            Node::File(file) => &file.name,
            Node::Folder(folder) => &folder.name,
        }
    }

    /// Handle of the owning folder; `None` for the root and detached nodes
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::File(file) => file.parent,
            Node::Folder(folder) => folder.parent,
        }
    }

    /// Construction timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Node::File(file) => file.created_at,
            Node::Folder(folder) => folder.created_at,
        }
    }

    /// Timestamp of the most recent mutation of this node
    pub fn last_modified(&self) -> DateTime<Utc> {
        match self {
            Node::File(file) => file.last_modified,
            Node::Folder(folder) => folder.last_modified,
        }
    }

    /// Whether an inline rename is in progress on this node
    pub fn renaming(&self) -> bool {
        match self {
            Node::File(file) => file.renaming,
            Node::Folder(folder) => folder.renaming,
        }
    }

    /// Returns true for the file variant
    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    /// Returns true for the folder variant
    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    /// Borrows the file variant, if this is a file
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Folder(_) => None,
        }
    }

    /// Borrows the folder variant, if this is a folder
    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Node::File(_) => None,
            Node::Folder(folder) => Some(folder),
        }
    }

    /// Replaces the name and bumps `last_modified`
    pub fn set_name(&mut self, name: impl Into<String>) {
        let now = Utc::now();
        match self {
            Node::File(file) => {
                file.name = name.into();
                file.last_modified = now;
            }
            Node::Folder(folder) => {
                folder.name = name.into();
                folder.last_modified = now;
            }
        }
    }

    /// Sets the rename-in-progress flag and bumps `last_modified`
    pub fn set_renaming(&mut self, renaming: bool) {
        let now = Utc::now();
        match self {
            Node::File(file) => {
                file.renaming = renaming;
                file.last_modified = now;
            }
            Node::Folder(folder) => {
                folder.renaming = renaming;
                folder.last_modified = now;
            }
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::File(file) => file.parent = parent,
            Node::Folder(folder) => folder.parent = parent,
        }
    }

    pub(crate) fn touch(&mut self) {
        let now = Utc::now();
        match self {
            Node::File(file) => file.last_modified = now,
            Node::Folder(folder) => folder.last_modified = now,
        }
    }

    pub(crate) fn as_folder_mut(&mut self) -> Option<&mut FolderNode> {
        match self {
            Node::File(_) => None,
            Node::Folder(folder) => Some(folder),
        }
    }

    pub(crate) fn as_file_mut(&mut self) -> Option<&mut FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Folder(_) => None,
        }
    }
}

impl From<FileNode> for Node {
    fn from(file: FileNode) -> Self {
        Node::File(file)
    }
}

impl From<FolderNode> for Node {
    fn from(folder: FolderNode) -> Self {
        Node::Folder(folder)
    }
}
