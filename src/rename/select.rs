//! File selection policy and project tree traversal

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::paths::is_hidden_name;

/// Extension-less files that are always rewritten
pub const SPECIAL_FILES: &[&str] = &["Justfile", "Makefile", "LICENSE", "CHANGELOG"];

/// Extensions of text files eligible for rewriting
pub const TEXT_EXTENSIONS: &[&str] = &["lua", "md", "txt", "sh", "nix", "yaml", "yml", "json"];

/// Build and dependency directories never descended into
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "build", "dist", "__pycache__"];

/// Whether a file's contents may be rewritten
pub fn should_process_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if SPECIAL_FILES.contains(&name) {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext))
}

/// Whether traversal stops at this directory
pub fn is_excluded_dir(name: &str) -> bool {
    is_hidden_name(name) || EXCLUDED_DIRS.contains(&name)
}

fn keep_entry(entry: &DirEntry) -> bool {
    // The root is walked even when it is `.` or hidden
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let excluded = entry
        .file_name()
        .to_str()
        .is_some_and(is_excluded_dir);
    if excluded {
        tracing::debug!(path = %entry.path().display(), "skipping directory");
    }
    !excluded
}

/// Collect every eligible file under `root`, in file-name order
///
/// The full list is built before the caller mutates anything.
pub fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(keep_entry)
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        // Symlinked files are rewritten through the link; linked dirs are not entered
        if entry.path().is_file() && should_process_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files
}
