//! # Editor Shell
//!
//! The session layer above the tree store: which file is open, what the
//! sidetab shows, and how all of it survives a restart.
//!
//! ## Philosophy
//!
//! - **One owner per concern**: the tree store owns tree policy; this
//!   crate only binds a session to it (active file, UI state, storage)
//! - **Storage is untrusted**: every key is validated on restore and a
//!   bad one degrades to its default instead of failing startup
//! - **Writes are earned**: syncing compares snapshot digests and skips
//!   the tree write when nothing changed
//!
//! ## Key Types
//!
//! - [`ShellSession`]: the session facade; all editor operations
//! - [`StateStore`]: keyed byte storage, in memory or on disk
//! - [`UiConfig`]: persisted sidetab state

pub mod language;
pub mod persistence;
pub mod render;
pub mod seed;
pub mod session;
pub mod ui;

pub use language::language_for;
pub use persistence::{keys, DirStateStore, MemoryStateStore, StateStore, StoreError};
pub use render::render_tree;
pub use seed::default_store;
pub use session::{ShellError, ShellSession};
pub use ui::{Sidetab, SidetabConfig, UiConfig};
