//! Path construction and rewriting
//!
//! Paths are derived values in this crate: a node's path is the join of its
//! ancestors' names, never stored. This module holds the joining fold and
//! the prefix rewriting used when a rename shifts a whole subtree.

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Joins path segments into a single absolute path.
///
/// Folds left from an empty accumulator: each segment loses one leading
/// separator, the accumulator loses one trailing separator, then the two
/// are joined with a single separator. Empty segments collapse to no-ops.
/// The result always carries a leading separator (the root's contribution).
///
/// # Examples
///
/// ```
/// use node_tree::path;
///
/// assert_eq!(path::join(&["/"]), "/");
/// assert_eq!(path::join(&["/", "src", "main.py"]), "/src/main.py");
/// assert_eq!(path::join(&["src", "main.py"]), "/src/main.py");
/// ```
pub fn join(segments: &[&str]) -> String {
    let mut joined = String::new();
    for segment in segments {
        let segment = segment.strip_prefix(SEPARATOR).unwrap_or(segment);
        if let Some(trimmed) = joined.strip_suffix(SEPARATOR) {
            joined.truncate(trimmed.len());
        }
        joined.push(SEPARATOR);
        joined.push_str(segment);
    }
    joined
}

/// Rewrites `path` after the subtree rooted at `old_prefix` moved to
/// `new_prefix`.
///
/// Returns `Some` with the rewritten path when `path` is `old_prefix`
/// itself or descends from it, `None` when the path is unaffected.
pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    if path == old_prefix {
        return Some(new_prefix.to_string());
    }
    let rest = path.strip_prefix(old_prefix)?;
    if rest.starts_with(SEPARATOR) {
        Some(format!("{}{}", new_prefix, rest))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_root_only() {
        assert_eq!(join(&["/"]), "/");
    }

    #[test]
    fn test_join_nested() {
        assert_eq!(join(&["/", "src", "main.py"]), "/src/main.py");
    }

    #[test]
    fn test_join_always_leads_with_separator() {
        assert_eq!(join(&["src"]), "/src");
        assert_eq!(join(&["src", "lib", "a.rs"]), "/src/lib/a.rs");
    }

    #[test]
    fn test_join_strips_redundant_separators() {
        assert_eq!(join(&["/src/", "/main.py"]), "/src/main.py");
    }

    #[test]
    fn test_join_empty_segment_collapses() {
        assert_eq!(join(&["", "src"]), "/src");
        assert_eq!(join(&["/", "", "main.py"]), "/main.py");
    }

    #[test]
    fn test_join_no_segments() {
        assert_eq!(join(&[]), "");
    }

    #[test]
    fn test_rebase_exact_match() {
        assert_eq!(
            rebase("/src/a.txt", "/src/a.txt", "/src/z.txt"),
            Some("/src/z.txt".to_string())
        );
    }

    #[test]
    fn test_rebase_descendant() {
        assert_eq!(
            rebase("/src/deep/a.txt", "/src", "/lib"),
            Some("/lib/deep/a.txt".to_string())
        );
    }

    #[test]
    fn test_rebase_unrelated_path() {
        assert_eq!(rebase("/docs/a.txt", "/src", "/lib"), None);
    }

    #[test]
    fn test_rebase_sibling_with_common_prefix() {
        // "/src2" starts with "/src" but is not inside it.
        assert_eq!(rebase("/src2/a.txt", "/src", "/lib"), None);
    }
}
