//! The rename pipeline
//!
//! Three steps over one root: move the fixed paths, rewrite eligible file
//! contents, patch the git remote. Every step logs what it does; only apply
//! mode touches the filesystem. Failures are recorded in the log and never
//! stop the run.

use std::path::{Path, PathBuf};

use crate::core::error::{RenameError, Result};
use crate::core::model::{Change, ChangeKind, ChangeLog, RenameJob};
use crate::core::paths::{display_relative, join_normalized};
use crate::core::render::Renderer;
use crate::rename::fsops;
use crate::rename::rules::{
    apply_rules, renamed_path, NEW_REMOTE, OLD_REMOTE, PATH_RENAMES, PATTERN_RULES,
};
use crate::rename::select::collect_files;

/// Git config holding the remote URL, relative to root
const GIT_CONFIG: &str = ".git/config";

pub struct Renamer<'a> {
    job: RenameJob,
    log: ChangeLog,
    echo: Option<&'a Renderer>,
}

impl<'a> Renamer<'a> {
    /// Create a renamer, failing if the root is not a directory
    pub fn new(job: RenameJob) -> Result<Self> {
        let root = job.root();
        if !root.exists() {
            return Err(RenameError::InvalidRoot {
                path: root.to_path_buf(),
                reason: "no such directory".to_string(),
            });
        }
        if !root.is_dir() {
            return Err(RenameError::InvalidRoot {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let log = ChangeLog::new(job.mode());
        Ok(Self {
            job,
            log,
            echo: None,
        })
    }

    /// Print every entry through `renderer` as it is logged
    pub fn with_echo(mut self, renderer: &'a Renderer) -> Self {
        self.echo = Some(renderer);
        self
    }

    fn apply(&self) -> bool {
        !self.job.mode().is_preview()
    }

    fn log(&mut self, change: Change) {
        if let Some(renderer) = self.echo {
            println!("{}", renderer.line(&change, self.job.mode()));
        }
        self.log.push(change);
    }

    /// Run all three steps and hand back the log
    pub fn run(mut self) -> ChangeLog {
        tracing::debug!(root = %self.job.root().display(), mode = ?self.job.mode(), "starting rename");

        self.log(Change::new(
            ChangeKind::Step,
            "Step 1: Renaming directories and files...",
        ));
        self.rename_paths();

        self.log(Change::new(
            ChangeKind::Step,
            "Step 2: Updating file contents...",
        ));
        self.process_all_files();

        self.log(Change::new(
            ChangeKind::Step,
            "Step 3: Checking git configuration...",
        ));
        self.update_git_remote();

        self.log
    }

    /// Move each configured path that exists under root
    pub fn rename_paths(&mut self) {
        for rule in PATH_RENAMES {
            let from = join_normalized(self.job.root(), rule.from);
            let to = join_normalized(self.job.root(), rule.to);

            if !from.exists() {
                self.log(
                    Change::new(
                        ChangeKind::Warning,
                        format!("Warning: Path not found: {}", rule.from),
                    )
                    .with_path(rule.from),
                );
                continue;
            }

            self.log(
                Change::new(
                    ChangeKind::Rename,
                    format!("Renaming: {} → {}", rule.from, rule.to),
                )
                .with_path(rule.from),
            );

            if self.apply() {
                if let Err(err) = fsops::move_path(&from, &to) {
                    self.log(
                        Change::new(ChangeKind::Error, format!("Error renaming {}: {}", rule.from, err))
                            .with_path(rule.from),
                    );
                }
            }
        }
    }

    /// Root-relative path a file is reported under
    ///
    /// Preview runs before anything moves, so it reports each file where
    /// apply mode finds it after step 1.
    fn reported_path(&self, path: &Path) -> String {
        let relative = display_relative(path, self.job.root());
        if self.apply() {
            relative
        } else {
            renamed_path(&relative).into_owned()
        }
    }

    /// Rewrite every eligible file under root
    pub fn process_all_files(&mut self) {
        let mut files: Vec<(String, PathBuf)> = collect_files(self.job.root())
            .into_iter()
            .map(|path| (self.reported_path(&path), path))
            .collect();
        // Component order is walk order, so preview matches the renamed tree
        files.sort_by(|a, b| Path::new(&a.0).cmp(Path::new(&b.0)));

        self.log(Change::new(
            ChangeKind::Info,
            format!("Processing {} files...", files.len()),
        ));
        for (relative, path) in &files {
            self.rewrite_file(path, relative);
        }
    }

    /// Apply the pattern rules to one file, logging it as `relative`
    pub fn rewrite_file(&mut self, path: &Path, relative: &str) {
        if let Err(err) = self.try_rewrite_file(path, relative) {
            tracing::debug!(path = %relative, error = %err, "rewrite failed");
            self.log(
                Change::new(
                    ChangeKind::Error,
                    format!("Error processing {}: {}", relative, err.detail()),
                )
                .with_path(relative),
            );
        }
    }

    fn try_rewrite_file(&mut self, path: &Path, relative: &str) -> Result<()> {
        let content = fsops::read_text(path)?;
        let (updated, hits) = apply_rules(&content, &PATTERN_RULES);
        if updated == content {
            return Ok(());
        }

        self.log(
            Change::new(ChangeKind::Update, format!("Updating file: {relative}")).with_path(relative),
        );
        for hit in hits {
            self.log(
                Change::new(
                    ChangeKind::Substitution,
                    format!(
                        "  - {} → {} ({} occurrences)",
                        hit.pattern, hit.replacement, hit.occurrences
                    ),
                )
                .with_path(relative),
            );
        }

        if self.apply() {
            fsops::write_text(path, &updated)?;
        }
        Ok(())
    }

    /// Point the git remote at the renamed repository
    pub fn update_git_remote(&mut self) {
        let config = join_normalized(self.job.root(), GIT_CONFIG);
        if !config.exists() {
            tracing::debug!("no git config found");
            return;
        }

        if let Err(err) = self.try_update_git_remote(&config) {
            self.log(
                Change::new(
                    ChangeKind::Warning,
                    format!("Warning: Could not update git config: {}", err.detail()),
                )
                .with_path(GIT_CONFIG),
            );
        }
    }

    fn try_update_git_remote(&mut self, config: &Path) -> Result<()> {
        let content = fsops::read_text(config)?;
        if !content.contains(OLD_REMOTE) {
            return Ok(());
        }

        self.log(Change::new(ChangeKind::Remote, "Updating git remote URL...").with_path(GIT_CONFIG));
        if self.apply() {
            fsops::write_text(config, &content.replace(OLD_REMOTE, NEW_REMOTE))?;
        }
        Ok(())
    }
}
