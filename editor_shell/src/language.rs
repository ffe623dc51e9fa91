//! File name to editor language mapping
//!
//! Resolves the syntax-highlighting language for a file from its
//! extension. The extension is taken from the last dot onward and
//! lowercased before lookup, so `Makefile.BAK.PY` still reads as Python.
//! Unknown extensions and extensionless names map to `None`; the editor
//! treats those as plain text.

/// Registered language ids, keyed by dot-inclusive extension.
const LANGUAGES: [(&str, &str); 15] = [
    (".py", "python"),
    (".ts", "typescript"),
    (".tsx", "typescript"),
    (".js", "javascript"),
    (".jsx", "javascript"),
    (".md", "markdown"),
    (".rs", "rust"),
    (".json", "json"),
    (".html", "html"),
    (".css", "css"),
    (".toml", "toml"),
    (".yaml", "yaml"),
    (".yml", "yaml"),
    (".sh", "shell"),
    (".txt", "plaintext"),
];

/// Maps a file name to its language id, if one is registered.
///
/// # Examples
///
/// ```
/// use editor_shell::language::language_for;
///
/// assert_eq!(language_for("main.py"), Some("python"));
/// assert_eq!(language_for("notes.TXT"), Some("plaintext"));
/// assert_eq!(language_for("Makefile"), None);
/// ```
pub fn language_for(file_name: &str) -> Option<&'static str> {
    let last_dot = file_name.rfind('.')?;
    let extension = file_name[last_dot..].to_lowercase();
    LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, id)| *id)
}
