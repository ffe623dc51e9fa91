//! First-run workspace content
//!
//! A session with nothing in storage starts here instead of staring at
//! an empty root: a README and a small `src` folder with one Python and
//! one TypeScript file, enough to show off the explorer and the editor.

use node_tree::{FileNode, FolderNode, Tree};
use tree_store::TreeStore;

/// Builds the default workspace store.
pub fn default_store() -> TreeStore {
    let mut tree = Tree::new();
    let root = tree.root_id();

    let readme = tree.insert(FileNode::new(
        "README.md",
        "# Hello World\n\nThis is a README file.",
    ));
    let src = tree.insert(FolderNode::new("src"));
    let main_py = tree.insert(FileNode::new("main.py", "print('Hello, World!')"));
    let utils_ts = tree.insert(FileNode::new("utils.ts", "console.log('Hello, World!')"));

    tree.attach(root, readme);
    tree.attach(root, src);
    tree.attach(src, main_py);
    tree.attach(src, utils_ts);

    // from_tree normalizes sibling order
    TreeStore::from_tree(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_contents() {
        let store = default_store();
        let tree = store.tree();

        let readme = store.get("/README.md").and_then(|n| n.as_file());
        assert_eq!(
            readme.map(|f| f.content()),
            Some("# Hello World\n\nThis is a README file.")
        );

        assert!(store.get("/src").is_some_and(|n| n.is_folder()));
        assert!(store.get("/src/main.py").is_some());
        assert!(store.get("/src/utils.ts").is_some());

        // folder before file at the root
        let names: Vec<&str> = tree
            .children(tree.root_id())
            .unwrap()
            .iter()
            .filter_map(|id| tree.node(*id))
            .map(|node| node.name())
            .collect();
        assert_eq!(names, ["src", "README.md"]);
    }

    #[test]
    fn test_seed_is_reproducible_in_shape() {
        // timestamps differ between calls; names and sizes do not
        let left = default_store();
        let right = default_store();
        let left_tree = left.tree();
        let right_tree = right.tree();
        assert_eq!(
            left_tree.size(left_tree.root_id()),
            right_tree.size(right_tree.root_id())
        );
    }
}
