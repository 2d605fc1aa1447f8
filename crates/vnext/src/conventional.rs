//! Commit Classifier (spec component E).
//!
//! Parses conventional-commit messages and aggregates the highest bump
//! across a commit range. Adapted from the teacher's regex-based
//! `CmtSummary` parser (rather than the `git-conventional` crate — see
//! `DESIGN.md`) so the grammar of spec §4.E can be matched precisely,
//! including the `BREAKING CHANGE:` body marker the crate does not surface
//! the way this engine needs.

use std::sync::OnceLock;

use regex::Regex;

use crate::bump::BumpType;

fn header_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<type>[A-Za-z]+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?:\s*(?P<description>.*)$")
            .expect("valid regex")
    })
}

const IGNORED_TYPES: &[&str] = &["chore", "docs", "style", "test", "ci", "build"];

/// A single parsed conventional-commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedCommit {
    pub(crate) type_: Option<String>,
    pub(crate) scope: Option<String>,
    pub(crate) breaking: bool,
    pub(crate) description: String,
}

impl ParsedCommit {
    pub(crate) fn parse(message: &str) -> ParsedCommit {
        let mut lines = message.lines();
        let header = lines.next().unwrap_or_default();
        let body_breaking = lines.any(|l| l.trim_start().starts_with("BREAKING CHANGE:"));

        match header_pattern().captures(header) {
            Some(caps) => ParsedCommit {
                type_: caps.name("type").map(|m| m.as_str().to_ascii_lowercase()),
                scope: caps.name("scope").map(|m| m.as_str().to_string()),
                breaking: body_breaking || caps.name("breaking").is_some(),
                description: caps
                    .name("description")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            },
            None => ParsedCommit {
                type_: None,
                scope: None,
                breaking: body_breaking,
                description: header.to_string(),
            },
        }
    }
}

/// Matching rules for the three configurable bump buckets (case-insensitive
/// substrings against the commit's type, per spec §4.E).
#[derive(Debug, Clone, Default)]
pub struct ConventionalCommitsConfig {
    pub enabled: bool,
    pub major_patterns: Vec<String>,
    pub minor_patterns: Vec<String>,
    pub patch_patterns: Vec<String>,
}

fn matches_any(haystack: &str, patterns: &[String]) -> bool {
    let haystack = haystack.to_ascii_lowercase();
    patterns
        .iter()
        .any(|p| haystack.contains(&p.to_ascii_lowercase()))
}

/// Map a single parsed commit to a bump type (spec §4.E mapping).
pub(crate) fn classify_commit(commit: &ParsedCommit, cfg: &ConventionalCommitsConfig) -> BumpType {
    if commit.breaking {
        return BumpType::Major;
    }
    let type_ = commit.type_.as_deref().unwrap_or_default();
    if matches_any(type_, &cfg.major_patterns) {
        return BumpType::Major;
    }
    if matches_any(type_, &cfg.minor_patterns) {
        return BumpType::Minor;
    }
    if matches_any(type_, &cfg.patch_patterns) {
        return BumpType::Patch;
    }
    if IGNORED_TYPES.contains(&type_) {
        return BumpType::None;
    }
    BumpType::Patch
}

/// Aggregate the maximum bump across a commit-message range (spec §4.E).
/// When conventional-commit analysis is disabled, any non-empty range
/// yields `Patch`.
pub(crate) fn classify_range(messages: &[String], cfg: &ConventionalCommitsConfig) -> BumpType {
    if !cfg.enabled {
        return if messages.is_empty() {
            BumpType::None
        } else {
            BumpType::Patch
        };
    }
    messages
        .iter()
        .map(|m| classify_commit(&ParsedCommit::parse(m), cfg))
        .fold(BumpType::None, BumpType::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("fix: correct the thing", Some("fix"), None, false)]
    #[case::scoped("feat(api): add endpoint", Some("feat"), Some("api"), false)]
    #[case::breaking_bang("feat!: remove old api", Some("feat"), None, true)]
    #[case::scoped_breaking("feat(api)!: remove old api", Some("feat"), Some("api"), true)]
    #[case::no_grammar("random commit message", None, None, false)]
    fn parses(
        #[case] message: &str,
        #[case] type_: Option<&str>,
        #[case] scope: Option<&str>,
        #[case] breaking: bool,
    ) {
        let parsed = ParsedCommit::parse(message);
        assert_eq!(parsed.type_.as_deref(), type_);
        assert_eq!(parsed.scope.as_deref(), scope);
        assert_eq!(parsed.breaking, breaking);
    }

    #[test]
    fn breaking_change_body_marker_is_detected() {
        let message = "feat: add endpoint\n\nBREAKING CHANGE: removes the old one";
        assert!(ParsedCommit::parse(message).breaking);
    }

    #[test]
    fn breaking_commit_is_major_regardless_of_type() {
        let cfg = ConventionalCommitsConfig {
            enabled: true,
            ..Default::default()
        };
        let commit = ParsedCommit::parse("fix!: urgent change");
        assert_eq!(classify_commit(&commit, &cfg), BumpType::Major);
    }

    #[test]
    fn ignored_types_produce_no_bump() {
        let cfg = ConventionalCommitsConfig {
            enabled: true,
            ..Default::default()
        };
        let commit = ParsedCommit::parse("docs: update readme");
        assert_eq!(classify_commit(&commit, &cfg), BumpType::None);
    }

    #[test]
    fn unknown_type_defaults_to_patch() {
        let cfg = ConventionalCommitsConfig {
            enabled: true,
            ..Default::default()
        };
        let commit = ParsedCommit::parse("perf: speed things up");
        assert_eq!(classify_commit(&commit, &cfg), BumpType::Patch);
    }

    #[test]
    fn disabled_analysis_yields_patch_for_any_nonempty_range() {
        let cfg = ConventionalCommitsConfig::default();
        let messages = vec!["anything at all".to_string()];
        assert_eq!(classify_range(&messages, &cfg), BumpType::Patch);
    }

    #[test]
    fn aggregate_returns_maximum_bump() {
        let cfg = ConventionalCommitsConfig {
            enabled: true,
            ..Default::default()
        };
        let messages = vec![
            "docs: update readme".to_string(),
            "fix: patch a bug".to_string(),
            "feat!: breaking change".to_string(),
        ];
        assert_eq!(classify_range(&messages, &cfg), BumpType::Major);
    }
}
