//! Text rendering of the explorer tree
//!
//! Flattens a tree into the indented line form the file explorer shows:
//! two spaces of indent per depth level, `v`/`>` markers on expanded and
//! collapsed folders, `*` on the active file. Collapsed subtrees are
//! skipped entirely. The root itself is never shown; its children are
//! the top level.

use node_tree::{Node, NodeId, Tree};

/// Renders the tree into display lines.
pub fn render_tree(tree: &Tree, active: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(children) = tree.children(tree.root_id()) {
        for child in children {
            render_node(tree, *child, active, 0, &mut lines);
        }
    }
    lines
}

fn render_node(
    tree: &Tree,
    id: NodeId,
    active: Option<&str>,
    depth: usize,
    lines: &mut Vec<String>,
) {
    let Some(node) = tree.node(id) else { return };
    let indent = "  ".repeat(depth);
    match node {
        Node::Folder(folder) => {
            let marker = if folder.expand() { 'v' } else { '>' };
            lines.push(format!("{indent}{marker} {}/", folder.name()));
            if folder.expand() {
                for child in folder.children() {
                    render_node(tree, *child, active, depth + 1, lines);
                }
            }
        }
        Node::File(file) => {
            let is_active = active.is_some_and(|path| tree.path(id).as_deref() == Some(path));
            let marker = if is_active { '*' } else { ' ' };
            lines.push(format!("{indent}{marker} {}", file.name()));
        }
    }
}
