//! Run model
//!
//! A run is described by an immutable [`RenameJob`] and produces an
//! append-only [`ChangeLog`]. Nothing here outlives the process.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Execution mode of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Detect and log, never touch the filesystem
    #[default]
    Preview,
    /// Perform every logged action
    Apply,
}

impl Mode {
    pub fn from_execute(execute: bool) -> Self {
        if execute {
            Mode::Apply
        } else {
            Mode::Preview
        }
    }

    pub fn is_preview(self) -> bool {
        self == Mode::Preview
    }

    /// Banner label
    pub fn label(self) -> &'static str {
        match self {
            Mode::Preview => "DRY RUN",
            Mode::Apply => "EXECUTE",
        }
    }
}

/// Configuration of a single run
#[derive(Debug, Clone)]
pub struct RenameJob {
    root: PathBuf,
    mode: Mode,
}

impl RenameJob {
    pub fn new(root: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            root: root.into(),
            mode,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// What a change log entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Pipeline step header
    Step,
    /// Path move
    Rename,
    /// File whose content changes
    Update,
    /// One rule's contribution to a file update
    Substitution,
    /// Git remote rewrite
    Remote,
    /// Progress note
    Info,
    Warning,
    Error,
}

impl ChangeKind {
    /// Whether the entry describes a filesystem change
    pub fn is_actionable(self) -> bool {
        matches!(
            self,
            ChangeKind::Rename | ChangeKind::Update | ChangeKind::Remote
        )
    }
}

/// A single change log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub kind: ChangeKind,

    /// Human-readable description
    pub message: String,

    /// Path relative to root, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Change {
    pub fn new(kind: ChangeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Ordered, append-only log of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChangeLog {
    pub mode: Mode,
    pub entries: Vec<Change>,
}

impl ChangeLog {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, change: Change) {
        self.entries.push(change);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.entries.iter()
    }

    /// Entries that describe a filesystem change
    pub fn actionable_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|c| c.kind.is_actionable())
            .count()
    }

    pub fn count_of(&self, kind: ChangeKind) -> usize {
        self.entries.iter().filter(|c| c.kind == kind).count()
    }
}
