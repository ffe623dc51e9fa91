//! Content-addressed tree snapshots
//!
//! A [`TreeSnapshot`] freezes the persisted form of a tree together with a
//! SHA-256 digest over every stored field. Two snapshots compare equal
//! exactly when their digests match, which makes change detection a
//! 32-byte comparison instead of a structural walk — callers diff
//! snapshots to decide whether anything needs writing back to storage.

use node_tree::Tree;
use sha2::{Digest, Sha256};

use crate::persisted::{self, PersistedNode};
use crate::schema::{self, SchemaError};

/// An immutable capture of a whole tree, fingerprinted for cheap diffing.
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    root: PersistedNode,
    digest: [u8; 32],
}

impl TreeSnapshot {
    /// Captures the current state of `tree`.
    pub fn capture(tree: &Tree) -> Self {
        let root = PersistedNode::from_tree(tree);
        let digest = digest_of(&root);
        Self { root, digest }
    }

    /// The persisted root node this snapshot froze.
    pub fn root(&self) -> &PersistedNode {
        &self.root
    }

    /// SHA-256 over every stored field, children in order.
    pub fn digest(&self) -> [u8; 32] {
        self.digest
    }

    /// Serializes the snapshot to the stored JSON format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SchemaError> {
        serde_json::to_vec_pretty(&self.root).map_err(|err| SchemaError::Json(err.to_string()))
    }

    /// Decodes stored bytes back into a snapshot, validating the schema
    /// and recomputing the digest from what was actually read.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchemaError> {
        let root = schema::decode_tree(bytes)?;
        let digest = digest_of(&root);
        Ok(Self { root, digest })
    }

    /// Rebuilds a live tree from the frozen state.
    pub fn to_tree(&self) -> Result<Tree, SchemaError> {
        persisted::from_persisted(&self.root)
    }
}

impl PartialEq for TreeSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest
    }
}

impl Eq for TreeSnapshot {}

fn digest_of(root: &PersistedNode) -> [u8; 32] {
    let mut hasher = Sha256::new();
    feed_node(&mut hasher, root);
    hasher.finalize().into()
}

// The `parent` field is derived from nesting and never fed: a node's
// position is already covered by the order the walk visits it in.
fn feed_node(hasher: &mut Sha256, node: &PersistedNode) {
    match node {
        PersistedNode::File(file) => {
            hasher.update([0u8]);
            feed_str(hasher, &file.name);
            feed_str(hasher, &file.created_at.to_rfc3339());
            feed_str(hasher, &file.last_modified.to_rfc3339());
            hasher.update([file.renaming as u8]);
            feed_str(hasher, &file.content);
        }
        PersistedNode::Folder(folder) => {
            hasher.update([1u8]);
            feed_str(hasher, &folder.name);
            feed_str(hasher, &folder.created_at.to_rfc3339());
            feed_str(hasher, &folder.last_modified.to_rfc3339());
            hasher.update([folder.renaming as u8]);
            hasher.update([folder.expand as u8]);
            hasher.update((folder.children.len() as u64).to_le_bytes());
            for child in &folder.children {
                feed_node(hasher, child);
            }
        }
    }
}

fn feed_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
