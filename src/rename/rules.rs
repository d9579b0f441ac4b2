//! Rename rule tables
//!
//! Pattern rules form an ordered pipeline: each rule rewrites the output of
//! the previous one. Specific patterns come first, the bare-identifier
//! catch-all comes last.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

use crate::core::error::{RenameError, Result};

/// Project name as it appears in the git remote URL
pub const OLD_REMOTE: &str = "claude-code.nvim";
pub const NEW_REMOTE: &str = "claude-code-ide.nvim";

/// A global regex substitution
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    replacement: &'static str,
    /// Capture group whose presence marks a match as already renamed
    guard: Option<&'static str>,
    /// Required character after a match; `None` is end of content
    followed_by: Option<fn(Option<char>) -> bool>,
    /// Pattern shown in the log when it differs from the compiled one
    shown_as: Option<&'static str>,
}

/// Effect of one rule on one piece of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub pattern: String,
    pub replacement: String,
    /// Matches found before substitution
    pub occurrences: usize,
}

impl PatternRule {
    pub fn new(pattern: &str, replacement: &'static str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| RenameError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            replacement,
            guard: None,
            followed_by: None,
            shown_as: None,
        })
    }

    /// Leave matches where the named group participated untouched
    pub fn guarded(mut self, group: &'static str) -> Self {
        self.guard = Some(group);
        self
    }

    /// Only substitute matches whose next character satisfies `check`
    ///
    /// The character is inspected but not consumed, so it can start the
    /// next match.
    pub fn followed_by(mut self, check: fn(Option<char>) -> bool) -> Self {
        self.followed_by = Some(check);
        self
    }

    pub fn shown_as(mut self, pattern: &'static str) -> Self {
        self.shown_as = Some(pattern);
        self
    }

    pub fn pattern(&self) -> &str {
        match self.shown_as {
            Some(pattern) => pattern,
            None => self.regex.as_str(),
        }
    }

    pub fn replacement(&self) -> &str {
        self.replacement
    }

    fn accepts(&self, content: &str, caps: &Captures<'_>) -> bool {
        if self.guard.is_some_and(|g| caps.name(g).is_some()) {
            return false;
        }
        match (self.followed_by, caps.get(0)) {
            (Some(check), Some(m)) => check(content[m.end()..].chars().next()),
            _ => true,
        }
    }

    /// Number of matches this rule would substitute in `content`
    pub fn count(&self, content: &str) -> usize {
        self.regex
            .captures_iter(content)
            .filter(|caps| self.accepts(content, caps))
            .count()
    }

    /// Substitute every non-overlapping match
    pub fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        if self.guard.is_none() && self.followed_by.is_none() {
            return self.regex.replace_all(content, self.replacement);
        }
        self.regex.replace_all(content, |caps: &Captures<'_>| {
            if self.accepts(content, caps) {
                let mut out = String::new();
                caps.expand(self.replacement, &mut out);
                out
            } else {
                caps[0].to_string()
            }
        })
    }
}

fn build_pattern_rules() -> Result<Vec<PatternRule>> {
    Ok(vec![
        // Qualified file names
        PatternRule::new(r"claude-code\.nvim", "claude-code-ide.nvim")?,
        PatternRule::new(r"claude-code\.txt", "claude-code-ide.txt")?,
        PatternRule::new(r"claude-code\.log", "claude-code-ide.log")?,
        PatternRule::new(r"ianks/claude-code\.nvim", "ianks/claude-code-ide.nvim")?,
        // Lua requires
        PatternRule::new(r#"require\("claude-code"\)"#, r#"require("claude-code-ide")"#)?,
        PatternRule::new(r#"require\("claude-code\."#, r#"require("claude-code-ide."#)?,
        PatternRule::new(r"require\('claude-code'\)", "require('claude-code-ide')")?,
        PatternRule::new(r"require\('claude-code\.", "require('claude-code-ide.")?,
        // Events
        PatternRule::new(r"claude-code:", "claude-code-ide:")?,
        // Help tags; the replacement itself starts with `*claude-code-`
        PatternRule::new(r"\*claude-code-(?P<renamed>ide\b)?", "*claude-code-ide-")?
            .guarded("renamed"),
        // Paths
        PatternRule::new(r"/claude-code/", "/claude-code-ide/")?,
        PatternRule::new(r#""claude-code/"#, r#""claude-code-ide/"#)?,
        PatternRule::new(r"'claude-code/", "'claude-code-ide/")?,
        // Bare identifier; the trailing delimiter may open the next match
        PatternRule::new(r#"(\s|^|")claude-code"#, "${1}claude-code-ide")?
            .followed_by(ends_identifier)
            .shown_as(r#"(\s|^|")claude-code(\s|$|")"#),
    ])
}

fn ends_identifier(next: Option<char>) -> bool {
    next.map_or(true, |c| c.is_whitespace() || c == '"')
}

/// The ordered substitution pipeline
pub static PATTERN_RULES: Lazy<Vec<PatternRule>> =
    Lazy::new(|| build_pattern_rules().expect("Invalid built-in pattern rule"));

/// A file or directory to move, relative to root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRenameRule {
    pub from: &'static str,
    pub to: &'static str,
}

pub const PATH_RENAMES: &[PathRenameRule] = &[
    PathRenameRule {
        from: "lua/claude-code",
        to: "lua/claude-code-ide",
    },
    PathRenameRule {
        from: "doc/claude-code.txt",
        to: "doc/claude-code-ide.txt",
    },
    PathRenameRule {
        from: "plugin/claude-code.lua",
        to: "plugin/claude-code-ide.lua",
    },
];

/// Where a root-relative path ends up once `PATH_RENAMES` have been applied
pub fn renamed_path(relative: &str) -> Cow<'_, str> {
    for rule in PATH_RENAMES {
        if let Some(rest) = relative.strip_prefix(rule.from) {
            if rest.is_empty() || rest.starts_with('/') {
                return Cow::Owned(format!("{}{}", rule.to, rest));
            }
        }
    }
    Cow::Borrowed(relative)
}

/// Run `content` through `rules` in order
///
/// Returns the final content and, for each rule that changed something,
/// its match count taken before that rule substituted.
pub fn apply_rules(content: &str, rules: &[PatternRule]) -> (String, Vec<RuleHit>) {
    let mut current = content.to_string();
    let mut hits = Vec::new();

    for rule in rules {
        let next = match rule.apply(&current) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(s) => s,
        };
        if next == current {
            continue;
        }
        hits.push(RuleHit {
            pattern: rule.pattern().to_string(),
            replacement: rule.replacement().to_string(),
            occurrences: rule.count(&current),
        });
        current = next;
    }

    (current, hits)
}
