//! Editor session orchestration
//!
//! [`ShellSession`] ties the pieces together: the tree store, the active
//! file binding, the sidetab configuration, and the digest of the last
//! state written to storage. Mutations delegate to the store and keep the
//! binding coherent — renaming a folder moves the active path with it,
//! removing a subtree closes a file that lived inside it.
//!
//! Restoring never fails: every stored key is validated independently,
//! and a key that does not decode degrades to its default (seed tree,
//! no active file, default UI) with a warning. Syncing is digest-gated,
//! so an unchanged tree costs one comparison instead of a rewrite.

use node_tree::{path, Node};
use thiserror::Error;
use tree_store::{TreeError, TreeSnapshot, TreeStore};

use crate::persistence::{keys, StateStore, StoreError};
use crate::ui::{Sidetab, SidetabConfig, UiConfig};
use crate::{language, render, seed};

/// Errors raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    /// The underlying tree edit was rejected.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The operation needs an open file and none is.
    #[error("no file is open")]
    NoActiveFile,
}

/// One editor session: a tree, an active file, and UI state.
pub struct ShellSession {
    files: TreeStore,
    active_file: Option<String>,
    ui: UiConfig,
    last_synced: Option<[u8; 32]>,
}

impl ShellSession {
    /// Starts a fresh session on the default workspace.
    pub fn new() -> Self {
        Self {
            files: seed::default_store(),
            active_file: None,
            ui: UiConfig::default(),
            last_synced: None,
        }
    }

    /// Restores a session from storage.
    ///
    /// Each key degrades independently: an unreadable tree reseeds the
    /// workspace, an unreadable UI config falls back to defaults, and an
    /// active file that no longer resolves to a file is cleared. Nothing
    /// here returns an error — a damaged store costs state, not startup.
    pub fn restore(store: &impl StateStore) -> Self {
        let mut last_synced = None;
        let files = match load_tree(store) {
            Ok(Some((digest, files))) => {
                last_synced = Some(digest);
                files
            }
            Ok(None) => seed::default_store(),
            Err(reason) => {
                log::warn!("stored tree rejected, reseeding workspace: {reason}");
                seed::default_store()
            }
        };

        let active_file = match load_active_file(store) {
            Ok(Some(path)) => {
                if files.get(&path).is_some_and(Node::is_file) {
                    Some(path)
                } else {
                    log::warn!("stored active file {path:?} is not in the tree, clearing");
                    None
                }
            }
            Ok(None) => None,
            Err(reason) => {
                log::warn!("stored active file rejected, clearing: {reason}");
                None
            }
        };

        let ui = match load_ui(store) {
            Ok(Some(ui)) => ui,
            Ok(None) => UiConfig::default(),
            Err(reason) => {
                log::warn!("stored UI config rejected, using defaults: {reason}");
                UiConfig::default()
            }
        };

        Self {
            files,
            active_file,
            ui,
            last_synced,
        }
    }

    /// Writes session state to storage.
    ///
    /// The tree is written only when its digest differs from the last
    /// synced one; the active file and UI config are small and always
    /// refreshed. Returns whether the tree bytes were written.
    pub fn sync(&mut self, store: &mut impl StateStore) -> Result<bool, StoreError> {
        let snapshot = self.files.snapshot();
        let digest = snapshot.digest();
        let tree_written = self.last_synced != Some(digest);
        if tree_written {
            let bytes = snapshot
                .to_bytes()
                .map_err(|err| StoreError::Encode(err.to_string()))?;
            store.save(keys::TREE, &bytes)?;
            self.last_synced = Some(digest);
        } else {
            log::debug!("tree unchanged since last sync, skipping the write");
        }

        let active = serde_json::to_vec(&self.active_file)
            .map_err(|err| StoreError::Encode(err.to_string()))?;
        store.save(keys::ACTIVE_FILE, &active)?;

        let ui = serde_json::to_vec(&self.ui).map_err(|err| StoreError::Encode(err.to_string()))?;
        store.save(keys::UI_CONFIG, &ui)?;

        Ok(tree_written)
    }

    /// The tree store behind this session.
    pub fn files(&self) -> &TreeStore {
        &self.files
    }

    /// The current UI configuration.
    pub fn ui(&self) -> &UiConfig {
        &self.ui
    }

    /// Handles a click on a sidetab: a different tab (or a closed panel)
    /// opens and selects it, the currently open tab closes the panel.
    pub fn select_tab(&mut self, tab: Sidetab) {
        let open = !self.ui.sidetab.open || self.ui.sidetab.tab != tab;
        self.ui.sidetab = SidetabConfig { open, tab };
    }

    /// The path of the open file, if any.
    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    /// The node behind the open file.
    pub fn active_node(&self) -> Option<&Node> {
        self.files.get(self.active_file.as_deref()?)
    }

    /// Language id for the open file, for syntax highlighting.
    pub fn active_language(&self) -> Option<&'static str> {
        language::language_for(self.active_node()?.name())
    }

    /// Opens the file at `path` in the editor.
    pub fn open_file(&mut self, path: &str) -> Result<(), ShellError> {
        match self.files.get(path) {
            Some(node) if node.is_file() => {
                self.active_file = Some(path.to_string());
                Ok(())
            }
            _ => Err(ShellError::Tree(TreeError::NotFound(path.to_string()))),
        }
    }

    /// Closes the open file.
    pub fn close_file(&mut self) {
        self.active_file = None;
    }

    /// Replaces the content of the open file.
    pub fn edit_active(&mut self, content: &str) -> Result<(), ShellError> {
        let path = self.active_file.clone().ok_or(ShellError::NoActiveFile)?;
        self.files.set_content(&path, content)?;
        Ok(())
    }

    /// Creates a file inside the folder at `folder_path`.
    pub fn create_file(
        &mut self,
        folder_path: &str,
        name: &str,
        content: &str,
    ) -> Result<(), ShellError> {
        self.files.add(folder_path, Node::file(name, content))?;
        Ok(())
    }

    /// Creates a folder inside the folder at `folder_path`.
    pub fn create_folder(&mut self, folder_path: &str, name: &str) -> Result<(), ShellError> {
        self.files.add(folder_path, Node::folder(name))?;
        Ok(())
    }

    /// Removes the subtree at `path`; closes the open file if it was inside.
    pub fn remove(&mut self, path: &str) {
        let tree = self.files.tree();
        let removes_node = tree.find(path).is_some_and(|id| id != tree.root_id());
        self.files.remove(path);
        if removes_node {
            if let Some(active) = self.active_file.as_deref() {
                let inside =
                    active == path || active.starts_with(&format!("{path}{}", path::SEPARATOR));
                if inside {
                    self.active_file = None;
                }
            }
        }
    }

    /// Renames the node at `path`; an active path at or under it follows.
    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<(), ShellError> {
        self.files.rename(path, new_name)?;
        let new_path = renamed_path(path, new_name);
        if let Some(active) = self.active_file.as_deref() {
            if let Some(rebased) = path::rebase(active, path, &new_path) {
                self.active_file = Some(rebased);
            }
        }
        Ok(())
    }

    /// Flips the expand state of the folder at `path`.
    pub fn toggle_expand(&mut self, path: &str) -> Result<(), ShellError> {
        self.files.toggle_expand(path)?;
        Ok(())
    }

    /// Puts the node at `path` into inline-rename mode.
    pub fn begin_rename(&mut self, path: &str) -> Result<(), ShellError> {
        self.files.set_renaming(path, true)?;
        Ok(())
    }

    /// Commits an inline rename: renames, leaves rename mode, and opens
    /// the node's new path when it is a file.
    ///
    /// A rejected name propagates the error and keeps the node in rename
    /// mode, so the caller can surface the message and let the user retry.
    pub fn commit_rename(&mut self, path: &str, new_name: &str) -> Result<(), ShellError> {
        self.rename(path, new_name)?;
        let new_path = renamed_path(path, new_name);
        self.files.set_renaming(&new_path, false)?;
        if self.files.get(&new_path).is_some_and(Node::is_file) {
            self.active_file = Some(new_path);
        }
        Ok(())
    }

    /// Leaves inline-rename mode without renaming.
    pub fn cancel_rename(&mut self, path: &str) -> Result<(), ShellError> {
        self.files.set_renaming(path, false)?;
        Ok(())
    }

    /// Renders the explorer for the current state.
    pub fn render(&self) -> Vec<String> {
        render::render_tree(self.files.tree(), self.active_file.as_deref())
    }
}

impl Default for ShellSession {
    fn default() -> Self {
        Self::new()
    }
}

fn renamed_path(path: &str, new_name: &str) -> String {
    let parent = match path.rfind(path::SEPARATOR) {
        Some(index) => &path[..index],
        None => "",
    };
    path::join(&[parent, new_name])
}

fn load_tree(store: &impl StateStore) -> Result<Option<([u8; 32], TreeStore)>, String> {
    let Some(bytes) = store.load(keys::TREE).map_err(|err| err.to_string())? else {
        return Ok(None);
    };
    let snapshot = TreeSnapshot::from_bytes(&bytes).map_err(|err| err.to_string())?;
    let tree = snapshot.to_tree().map_err(|err| err.to_string())?;
    // from_tree re-sorts; the stored digest decides whether the next sync
    // needs to write the canonical form back
    Ok(Some((snapshot.digest(), TreeStore::from_tree(tree))))
}

fn load_active_file(store: &impl StateStore) -> Result<Option<String>, String> {
    let Some(bytes) = store.load(keys::ACTIVE_FILE).map_err(|err| err.to_string())? else {
        return Ok(None);
    };
    serde_json::from_slice::<Option<String>>(&bytes).map_err(|err| err.to_string())
}

fn load_ui(store: &impl StateStore) -> Result<Option<UiConfig>, String> {
    let Some(bytes) = store.load(keys::UI_CONFIG).map_err(|err| err.to_string())? else {
        return Ok(None);
    };
    serde_json::from_slice::<UiConfig>(&bytes)
        .map(Some)
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStateStore;

    #[test]
    fn test_new_session_has_seed_and_no_active_file() {
        let session = ShellSession::new();
        assert!(session.files().get("/README.md").is_some());
        assert!(session.files().get("/src/main.py").is_some());
        assert_eq!(session.active_file(), None);
        assert!(session.ui().sidetab.open);
    }

    #[test]
    fn test_open_edit_close() {
        let mut session = ShellSession::new();
        session.open_file("/src/main.py").unwrap();
        assert_eq!(session.active_file(), Some("/src/main.py"));
        assert_eq!(session.active_language(), Some("python"));

        session.edit_active("print('changed')").unwrap();
        let node = session.active_node().and_then(Node::as_file).unwrap();
        assert_eq!(node.content(), "print('changed')");

        session.close_file();
        assert_eq!(session.active_file(), None);
        assert_eq!(session.edit_active("nope"), Err(ShellError::NoActiveFile));
    }

    #[test]
    fn test_open_file_rejects_folders_and_missing_paths() {
        let mut session = ShellSession::new();
        assert!(session.open_file("/src").is_err());
        assert!(session.open_file("/nope.txt").is_err());
        assert_eq!(session.active_file(), None);
    }

    #[test]
    fn test_rename_rebases_the_active_file() {
        let mut session = ShellSession::new();
        session.open_file("/src/main.py").unwrap();

        // renaming the file itself
        session.rename("/src/main.py", "app.py").unwrap();
        assert_eq!(session.active_file(), Some("/src/app.py"));

        // renaming an ancestor folder
        session.rename("/src", "lib").unwrap();
        assert_eq!(session.active_file(), Some("/lib/app.py"));
    }

    #[test]
    fn test_rename_leaves_unrelated_active_file_alone() {
        let mut session = ShellSession::new();
        session.open_file("/README.md").unwrap();
        session.rename("/src", "lib").unwrap();
        assert_eq!(session.active_file(), Some("/README.md"));
    }

    #[test]
    fn test_remove_closes_a_file_inside_the_subtree() {
        let mut session = ShellSession::new();
        session.open_file("/src/main.py").unwrap();
        session.remove("/src");
        assert_eq!(session.active_file(), None);
        assert!(session.files().get("/src").is_none());
    }

    #[test]
    fn test_remove_keeps_an_unrelated_file_open() {
        let mut session = ShellSession::new();
        session.open_file("/README.md").unwrap();
        session.remove("/src");
        assert_eq!(session.active_file(), Some("/README.md"));
    }

    #[test]
    fn test_remove_root_changes_nothing() {
        let mut session = ShellSession::new();
        session.open_file("/README.md").unwrap();
        session.remove("/");
        assert_eq!(session.active_file(), Some("/README.md"));
        assert!(session.files().get("/src").is_some());
    }

    #[test]
    fn test_inline_rename_workflow() {
        let mut session = ShellSession::new();
        session.begin_rename("/src/utils.ts").unwrap();
        assert!(session.files().get("/src/utils.ts").unwrap().renaming());

        session.commit_rename("/src/utils.ts", "helpers.ts").unwrap();
        let node = session.files().get("/src/helpers.ts").unwrap();
        assert!(!node.renaming());
        // committing a file rename opens it
        assert_eq!(session.active_file(), Some("/src/helpers.ts"));
    }

    #[test]
    fn test_failed_commit_stays_in_rename_mode() {
        let mut session = ShellSession::new();
        session.begin_rename("/src/main.py").unwrap();

        // utils.ts already exists next to it
        let err = session.commit_rename("/src/main.py", "utils.ts").unwrap_err();
        assert_eq!(err.to_string(), "file name already exists");
        assert!(session.files().get("/src/main.py").unwrap().renaming());

        session.cancel_rename("/src/main.py").unwrap();
        assert!(!session.files().get("/src/main.py").unwrap().renaming());
        assert_eq!(session.active_file(), None);
    }

    #[test]
    fn test_select_tab_follows_click_semantics() {
        let mut session = ShellSession::new();

        // clicking the open tab closes the panel
        session.select_tab(Sidetab::Files);
        assert!(!session.ui().sidetab.open);
        assert_eq!(session.ui().sidetab.tab, Sidetab::Files);

        // clicking while closed reopens
        session.select_tab(Sidetab::Search);
        assert!(session.ui().sidetab.open);
        assert_eq!(session.ui().sidetab.tab, Sidetab::Search);

        // clicking another tab while open switches without closing
        session.select_tab(Sidetab::Extensions);
        assert!(session.ui().sidetab.open);
        assert_eq!(session.ui().sidetab.tab, Sidetab::Extensions);
    }

    #[test]
    fn test_sync_is_digest_gated() {
        let mut backend = MemoryStateStore::new();
        let mut session = ShellSession::new();

        assert!(session.sync(&mut backend).unwrap());
        assert!(!session.sync(&mut backend).unwrap());

        session.create_file("/", "x.txt", "hello").unwrap();
        assert!(session.sync(&mut backend).unwrap());
        assert!(!session.sync(&mut backend).unwrap());
    }

    #[test]
    fn test_sync_writes_all_three_keys() {
        let mut backend = MemoryStateStore::new();
        let mut session = ShellSession::new();
        session.sync(&mut backend).unwrap();

        assert!(backend.load(keys::TREE).unwrap().is_some());
        assert_eq!(
            backend.load(keys::ACTIVE_FILE).unwrap(),
            Some(b"null".to_vec())
        );
        assert!(backend.load(keys::UI_CONFIG).unwrap().is_some());
    }

    #[test]
    fn test_restore_round_trip() {
        let mut backend = MemoryStateStore::new();
        let mut session = ShellSession::new();
        session.open_file("/src/main.py").unwrap();
        session.edit_active("print('persisted')").unwrap();
        session.select_tab(Sidetab::Search);
        session.sync(&mut backend).unwrap();

        let restored = ShellSession::restore(&backend);
        assert_eq!(restored.active_file(), Some("/src/main.py"));
        assert_eq!(restored.ui().sidetab.tab, Sidetab::Search);
        let content = restored
            .files()
            .get("/src/main.py")
            .and_then(Node::as_file)
            .map(|file| file.content().to_string());
        assert_eq!(content.as_deref(), Some("print('persisted')"));
    }

    #[test]
    fn test_restore_after_sync_skips_the_tree_write() {
        let mut backend = MemoryStateStore::new();
        let mut session = ShellSession::new();
        session.sync(&mut backend).unwrap();

        let mut restored = ShellSession::restore(&backend);
        assert!(!restored.sync(&mut backend).unwrap());
    }

    #[test]
    fn test_restore_reseeds_on_garbage_tree() {
        let mut backend = MemoryStateStore::new();
        backend.save(keys::TREE, b"{\"type\":\"file\"}").unwrap();

        let session = ShellSession::restore(&backend);
        assert!(session.files().get("/README.md").is_some());
        assert!(session.files().get("/src/main.py").is_some());
    }

    #[test]
    fn test_restore_clears_a_stale_active_file() {
        let mut backend = MemoryStateStore::new();
        let mut session = ShellSession::new();
        session.sync(&mut backend).unwrap();
        backend.save(keys::ACTIVE_FILE, b"\"/gone.txt\"").unwrap();

        let restored = ShellSession::restore(&backend);
        assert_eq!(restored.active_file(), None);
    }

    #[test]
    fn test_restore_defaults_on_invalid_ui_config() {
        let mut backend = MemoryStateStore::new();
        let mut session = ShellSession::new();
        session.sync(&mut backend).unwrap();
        backend
            .save(keys::UI_CONFIG, b"{\"sidetab\":{\"open\":true,\"tab\":\"terminal\"}}")
            .unwrap();

        let restored = ShellSession::restore(&backend);
        assert_eq!(*restored.ui(), UiConfig::default());
    }

    #[test]
    fn test_render_marks_the_active_file() {
        let mut session = ShellSession::new();
        session.toggle_expand("/src").unwrap();
        session.open_file("/src/main.py").unwrap();
        assert_eq!(
            session.render(),
            ["v src/", "  * main.py", "    utils.ts", "  README.md"]
        );
    }
}
