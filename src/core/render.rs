//! Renderer module
//!
//! Renders the change log to different output formats: text, jsonl, json

use colored::Colorize;
use serde_json::json;

use crate::core::model::{Change, ChangeKind, ChangeLog, Mode, RenameJob};
use crate::rename::rules::{NEW_REMOTE, OLD_REMOTE};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: false,
            quiet: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Whether entries are printed while the run progresses
    pub fn streams(&self) -> bool {
        self.format == OutputFormat::Text && !self.quiet
    }
}

const RULE: &str = "============================================================";

/// Renderer for change logs
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        colored::control::set_override(config.color);
        Self { config }
    }

    pub fn streams(&self) -> bool {
        self.config.streams()
    }

    /// Banner printed before the pipeline starts (text format only)
    pub fn banner(&self, job: &RenameJob) -> String {
        format!(
            "{RULE}\n{}\nRoot path: {}\nMode: {}\n{RULE}",
            format!("Renaming {OLD_REMOTE} to {NEW_REMOTE}").bold(),
            job.root().display(),
            job.mode().label()
        )
    }

    /// Render one entry as a line of running commentary
    pub fn line(&self, change: &Change, mode: Mode) -> String {
        let prefix = if mode.is_preview() { "[DRY RUN] " } else { "" };
        let body = match change.kind {
            ChangeKind::Step => change.message.bold().to_string(),
            ChangeKind::Rename | ChangeKind::Update => change.message.green().to_string(),
            ChangeKind::Substitution => change.message.dimmed().to_string(),
            ChangeKind::Remote => change.message.cyan().to_string(),
            ChangeKind::Info => change.message.clone(),
            ChangeKind::Warning => change.message.yellow().to_string(),
            ChangeKind::Error => change.message.red().to_string(),
        };
        // Steps and progress notes open a new paragraph
        let lead = match change.kind {
            ChangeKind::Step | ChangeKind::Info | ChangeKind::Remote => "\n",
            _ => "",
        };
        format!("{lead}{prefix}{body}")
    }

    /// Render the whole log in the configured format
    pub fn render(&self, log: &ChangeLog) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(log),
            OutputFormat::Jsonl => self.render_jsonl(log),
            OutputFormat::Json => self.render_json(log),
        }
    }

    /// Text output is streamed entry by entry, so only the summary is left
    fn render_text(&self, log: &ChangeLog) -> String {
        let verb = if log.mode.is_preview() {
            "would be"
        } else {
            "were"
        };
        let mut output = format!(
            "\n{RULE}\nSummary: {} changes {} made ({} warnings, {} errors)\n{RULE}",
            log.actionable_count(),
            verb,
            log.count_of(ChangeKind::Warning),
            log.count_of(ChangeKind::Error)
        );
        if log.mode.is_preview() {
            output.push_str("\n\nThis was a DRY RUN. No changes were made.");
            output.push_str("\nRun with --execute to apply changes.");
        }
        output
    }

    fn summary_value(log: &ChangeLog) -> serde_json::Value {
        json!({
            "kind": "summary",
            "mode": log.mode,
            "changes": log.actionable_count(),
            "warnings": log.count_of(ChangeKind::Warning),
            "errors": log.count_of(ChangeKind::Error),
        })
    }

    /// Render as JSON Lines (one entry per line, summary last)
    fn render_jsonl(&self, log: &ChangeLog) -> String {
        let mut lines: Vec<String> = log
            .iter()
            .filter_map(|change| serde_json::to_string(change).ok())
            .collect();
        lines.push(Self::summary_value(log).to_string());
        lines.join("\n")
    }

    /// Render as a single JSON document
    fn render_json(&self, log: &ChangeLog) -> String {
        let doc = json!({
            "mode": log.mode,
            "entries": log.entries,
            "summary": Self::summary_value(log),
        });
        serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log(mode: Mode) -> ChangeLog {
        let mut log = ChangeLog::new(mode);
        log.push(Change::new(
            ChangeKind::Step,
            "Step 1: Renaming directories and files...",
        ));
        log.push(Change::new(
            ChangeKind::Rename,
            "Renaming: lua/claude-code → lua/claude-code-ide",
        ));
        log.push(Change::new(
            ChangeKind::Warning,
            "Warning: Path not found: doc/claude-code.txt",
        ));
        log
    }

    fn plain(format: OutputFormat) -> Renderer {
        Renderer::with_config(RenderConfig::new(format))
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSONL".parse::<OutputFormat>(), Ok(OutputFormat::Jsonl));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("md".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_line_prefix_only_in_preview() {
        let renderer = plain(OutputFormat::Text);
        let change = Change::new(ChangeKind::Rename, "Renaming: a → b");
        assert_eq!(
            renderer.line(&change, Mode::Preview),
            "[DRY RUN] Renaming: a → b"
        );
        assert_eq!(renderer.line(&change, Mode::Apply), "Renaming: a → b");
    }

    #[test]
    fn test_text_summary_preview() {
        let renderer = Renderer::with_config(RenderConfig::new(OutputFormat::Text).with_quiet(true));
        let out = renderer.render(&sample_log(Mode::Preview));
        assert!(out.contains("Summary: 1 changes would be made (1 warnings, 0 errors)"));
        assert!(out.contains("This was a DRY RUN. No changes were made."));
        assert!(out.contains("Run with --execute to apply changes."));
        assert!(!out.contains("Renaming:"));
    }

    #[test]
    fn test_text_summary_apply() {
        let renderer = plain(OutputFormat::Text);
        let out = renderer.render(&sample_log(Mode::Apply));
        assert!(out.contains("Summary: 1 changes were made (1 warnings, 0 errors)"));
        assert!(!out.contains("DRY RUN"));
    }

    #[test]
    fn test_jsonl_one_line_per_entry_plus_summary() {
        let renderer = plain(OutputFormat::Jsonl);
        let out = renderer.render(&sample_log(Mode::Preview));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        let last: serde_json::Value = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(last["kind"], "summary");
        assert_eq!(last["mode"], "preview");
        assert_eq!(last["changes"], 1);
        assert_eq!(last["warnings"], 1);
    }

    #[test]
    fn test_json_document() {
        let renderer = plain(OutputFormat::Json);
        let out = renderer.render(&sample_log(Mode::Apply));
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["mode"], "apply");
        assert_eq!(doc["entries"].as_array().unwrap().len(), 3);
        assert_eq!(doc["entries"][1]["kind"], "rename");
    }
}
