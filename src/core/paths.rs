//! Path normalization utilities
//!
//! Paths shown in the change log use '/' as separator and are relative to root.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Relative path for display, falling back to the full path
pub fn display_relative(path: &Path, root: &Path) -> String {
    make_relative(path, root).unwrap_or_else(|| normalize_path(path))
}

/// Join a '/'-separated relative path onto a base
pub fn join_normalized(base: &Path, relative: &str) -> PathBuf {
    base.join(relative.replace('/', std::path::MAIN_SEPARATOR_STR))
}

/// Check if a file name is hidden (starts with '.')
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("lua/claude-code/init.lua");
        assert_eq!(normalize_path(path), "lua/claude-code/init.lua");
    }

    #[test]
    fn test_make_relative() {
        let root = Path::new("/project");
        let path = Path::new("/project/doc/claude-code.txt");
        assert_eq!(
            make_relative(path, root),
            Some("doc/claude-code.txt".to_string())
        );
    }

    #[test]
    fn test_make_relative_not_under_root() {
        let root = Path::new("/project");
        let path = Path::new("/other/file.lua");
        assert_eq!(make_relative(path, root), None);
    }

    #[test]
    fn test_display_relative_falls_back() {
        let root = Path::new("/project");
        assert_eq!(
            display_relative(Path::new("/other/file.lua"), root),
            "/other/file.lua"
        );
        assert_eq!(
            display_relative(Path::new("/project/a.md"), root),
            "a.md"
        );
    }

    #[test]
    fn test_join_normalized() {
        let base = Path::new("/project");
        let result = join_normalized(base, "lua/claude-code");
        assert!(result.ends_with("lua/claude-code"));
    }

    #[test]
    fn test_is_hidden_name() {
        assert!(is_hidden_name(".git"));
        assert!(is_hidden_name(".github"));
        assert!(!is_hidden_name("lua"));
    }
}
