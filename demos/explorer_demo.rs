//! Example walking an editor session end to end
//!
//! This example restores a session from a directory-backed store, edits
//! the tree, renders the explorer, syncs, and restores again to show the
//! state surviving a restart.

use editor_shell::{DirStateStore, ShellSession, Sidetab};

fn main() {
    env_logger::init();

    println!("=== Editor Shell Demo ===\n");

    // fresh state directory so every run starts from the seed
    let state_dir = std::env::temp_dir().join("editor_shell_demo");
    let _ = std::fs::remove_dir_all(&state_dir);
    let mut store = DirStateStore::open(&state_dir).expect("Failed to open state directory");

    println!("1. Restoring session from {}...", state_dir.display());
    let mut session = ShellSession::restore(&store);
    println!("   ✓ Seeded workspace\n");

    println!("2. Explorer after first launch:");
    for line in session.render() {
        println!("   {line}");
    }
    println!();

    println!("3. Working on the tree...");
    session
        .toggle_expand("/src")
        .expect("Failed to expand src");
    session
        .create_file("/src", "notes.md", "# Scratchpad")
        .expect("Failed to create notes.md");
    session
        .open_file("/src/main.py")
        .expect("Failed to open main.py");
    session
        .edit_active("print('Hello from the demo!')")
        .expect("Failed to edit main.py");
    session
        .rename("/src/utils.ts", "helpers.ts")
        .expect("Failed to rename utils.ts");
    session.select_tab(Sidetab::Search);
    println!("   ✓ Expanded /src, created notes.md, edited main.py");
    println!("   ✓ Renamed utils.ts → helpers.ts, switched to the search tab\n");

    println!("4. Explorer with an open file:");
    for line in session.render() {
        println!("   {line}");
    }
    println!(
        "   (active: {}, language: {})\n",
        session.active_file().unwrap_or("none"),
        session.active_language().unwrap_or("plain")
    );

    println!("5. Syncing to storage...");
    let wrote_tree = session.sync(&mut store).expect("Failed to sync");
    println!("   ✓ Tree written: {wrote_tree}");
    let wrote_tree = session.sync(&mut store).expect("Failed to sync");
    println!("   ✓ Second sync skipped the tree: wrote {wrote_tree}\n");

    println!("6. Restarting...");
    drop(session);
    let restored = ShellSession::restore(&store);
    println!("   ✓ Active file: {:?}", restored.active_file());
    println!("   ✓ Sidetab: {:?}", restored.ui().sidetab.tab);
    for line in restored.render() {
        println!("   {line}");
    }
    println!();

    println!("=== Demo Complete ===");
    println!("\nKey Points:");
    println!("✓ Sessions restore from keyed JSON state, seeding on first launch");
    println!("✓ Every mutation is validated and keeps siblings in canonical order");
    println!("✓ The active file follows renames and closes with removed subtrees");
    println!("✓ Syncing is digest-gated: unchanged trees are never rewritten");
}
