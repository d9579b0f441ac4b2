//! Error taxonomy for rename operations
//!
//! Only `InvalidRoot` is fatal. Everything else is caught at the operation
//! that produced it and turned into a change log entry.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    /// The configured root does not exist or is not a directory
    #[error("invalid root path {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// Read or write failure on a single file
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving a path failed (including the cross-device fallback)
    #[error("cannot move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rule table entry failed to compile
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl RenameError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RenameError::Io {
            path: path.into(),
            source,
        }
    }

    /// Underlying cause without the path prefix
    pub fn detail(&self) -> String {
        match self {
            RenameError::Io { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_path() {
        let err = RenameError::io(
            "lua/init.lua",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "lua/init.lua: denied");
    }

    #[test]
    fn test_detail_strips_path() {
        let err = RenameError::io(
            "/abs/doc.md",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        );
        assert_eq!(err.detail(), "bad utf-8");
    }

    #[test]
    fn test_invalid_root_display() {
        let err = RenameError::InvalidRoot {
            path: PathBuf::from("/nope"),
            reason: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "invalid root path /nope: not found");
    }
}
