//! Filesystem primitives used by the renamer

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::core::error::{RenameError, Result};

/// Read a whole file as UTF-8 text
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| RenameError::io(path, e))
}

/// Overwrite a file with `content`
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| RenameError::io(path, e))
}

/// Move a file or directory, creating missing parents of `to`
///
/// Falls back to copy-then-remove when `fs::rename` cannot cross devices.
pub fn move_path(from: &Path, to: &Path) -> Result<()> {
    let wrap = |source: io::Error| RenameError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            tracing::debug!(from = %from.display(), to = %to.display(), "cross-device move, copying");
            copy_recursive(from, to).map_err(wrap)?;
            remove_path(from).map_err(wrap)
        }
        Err(e) => Err(wrap(e)),
    }
}

fn is_cross_device(err: &io::Error) -> bool {
    // EXDEV on unix, ERROR_NOT_SAME_DEVICE on windows
    match err.raw_os_error() {
        Some(18) => cfg!(unix),
        Some(17) => cfg!(windows),
        _ => false,
    }
}

/// Copy a tree, recreating symlinks instead of following them
fn copy_recursive(from: &Path, to: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(from)?.file_type();
    if file_type.is_symlink() {
        return copy_link(from, to);
    }
    if !file_type.is_dir() {
        fs::copy(from, to)?;
        return Ok(());
    }

    for entry in WalkDir::new(from) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(io::Error::other)?;
        let target = to.join(relative);
        if entry.file_type().is_symlink() {
            copy_link(entry.path(), &target)?;
        } else if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_link(from: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(from)?, to)
}

#[cfg(windows)]
fn copy_link(from: &Path, to: &Path) -> io::Result<()> {
    let target = fs::read_link(from)?;
    if from.is_dir() {
        std::os::windows::fs::symlink_dir(target, to)
    } else {
        std::os::windows::fs::symlink_file(target, to)
    }
}

#[cfg(not(any(unix, windows)))]
fn copy_link(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).map(|_| ())
}

fn remove_path(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_move_file_creates_parents() {
        let temp = tempdir().unwrap();
        let from = temp.path().join("a.txt");
        fs::write(&from, "x").unwrap();
        let to = temp.path().join("nested/dir/b.txt");

        move_path(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "x");
    }

    #[test]
    fn test_move_directory() {
        let temp = tempdir().unwrap();
        let from = temp.path().join("lua/claude-code");
        fs::create_dir_all(from.join("sub")).unwrap();
        fs::write(from.join("init.lua"), "return {}").unwrap();
        fs::write(from.join("sub/x.lua"), "x").unwrap();
        let to = temp.path().join("lua/claude-code-ide");

        move_path(&from, &to).unwrap();

        assert!(!from.exists());
        assert!(to.join("init.lua").is_file());
        assert!(to.join("sub/x.lua").is_file());
    }

    #[test]
    fn test_copy_recursive_then_remove() {
        let temp = tempdir().unwrap();
        let from = temp.path().join("src");
        fs::create_dir_all(from.join("deep/er")).unwrap();
        fs::write(from.join("deep/er/f.md"), "deep").unwrap();
        let to = temp.path().join("dst");

        copy_recursive(&from, &to).unwrap();
        remove_path(&from).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(to.join("deep/er/f.md")).unwrap(), "deep");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_recursive_recreates_symlinks() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let shared = temp.path().join("shared");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("s.lua"), "s").unwrap();
        let from = temp.path().join("src");
        fs::create_dir_all(&from).unwrap();
        fs::write(from.join("init.lua"), "x").unwrap();
        symlink(&shared, from.join("shared")).unwrap();
        symlink("init.lua", from.join("alias.lua")).unwrap();
        let to = temp.path().join("dst");

        copy_recursive(&from, &to).unwrap();
        remove_path(&from).unwrap();

        let link = fs::symlink_metadata(to.join("shared")).unwrap();
        assert!(link.file_type().is_symlink());
        assert_eq!(fs::read_to_string(to.join("shared/s.lua")).unwrap(), "s");
        assert_eq!(fs::read_link(to.join("alias.lua")).unwrap(), Path::new("init.lua"));
        assert_eq!(fs::read_to_string(to.join("alias.lua")).unwrap(), "x");
        assert!(shared.join("s.lua").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_recursive_of_a_symlink_copies_the_link() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("real")).unwrap();
        let from = temp.path().join("link");
        std::os::unix::fs::symlink(temp.path().join("real"), &from).unwrap();
        let to = temp.path().join("moved");

        copy_recursive(&from, &to).unwrap();

        assert_eq!(fs::read_link(&to).unwrap(), temp.path().join("real"));
    }

    #[test]
    fn test_move_missing_source_fails() {
        let temp = tempdir().unwrap();
        let err = move_path(&temp.path().join("nope"), &temp.path().join("b")).unwrap_err();
        assert!(matches!(err, RenameError::Move { .. }));
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("bad.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(read_text(&path), Err(RenameError::Io { .. })));
    }
}
