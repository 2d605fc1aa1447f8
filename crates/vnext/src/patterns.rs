//! File Pattern Matcher (spec component D).
//!
//! Classifies changed paths into `{ignore, major, minor, patch,
//! unclassified}` buckets using glob patterns, then derives a bump type
//! from the result.

use glob::Pattern;

use crate::bump::BumpType;

/// A single compiled glob, case-insensitive, matched against
/// forward-slash-normalized paths.
#[derive(Debug, Clone)]
pub(crate) struct GlobSet {
    patterns: Vec<Pattern>,
}

impl GlobSet {
    pub(crate) fn compile(raw: &[String]) -> GlobSet {
        let patterns = raw
            .iter()
            .filter_map(|p| Pattern::new(&normalize(p)).ok())
            .collect();
        GlobSet { patterns }
    }

    pub(crate) fn matches(&self, path: &str) -> bool {
        let path = normalize(path);
        let options = glob::MatchOptions {
            case_sensitive: false,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.patterns.iter().any(|p| p.matches_with(&path, options))
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Bucketed classification of a set of changed paths.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChangeClassification {
    pub(crate) total: usize,
    pub(crate) ignored: Vec<String>,
    pub(crate) major: Vec<String>,
    pub(crate) minor: Vec<String>,
    pub(crate) patch: Vec<String>,
    pub(crate) unclassified: Vec<String>,
}

impl ChangeClassification {
    pub(crate) fn all_ignored(&self) -> bool {
        self.total > 0 && self.ignored.len() == self.total
    }
}

/// Configured glob buckets plus the matching policy (spec §4.D).
#[derive(Debug, Clone, Default)]
pub struct PatternConfig {
    pub(crate) ignore: GlobSet,
    pub(crate) major: GlobSet,
    pub(crate) minor: GlobSet,
    pub(crate) patch: GlobSet,
    pub(crate) source_only_mode: bool,
    pub(crate) minimum_bump: BumpType,
}

impl PatternConfig {
    /// Build a pattern configuration from raw glob strings for each bucket.
    pub fn new(
        ignore: &[String],
        major: &[String],
        minor: &[String],
        patch: &[String],
        source_only_mode: bool,
        minimum_bump: BumpType,
    ) -> PatternConfig {
        PatternConfig {
            ignore: GlobSet::compile(ignore),
            major: GlobSet::compile(major),
            minor: GlobSet::compile(minor),
            patch: GlobSet::compile(patch),
            source_only_mode,
            minimum_bump,
        }
    }
}

impl Default for GlobSet {
    fn default() -> GlobSet {
        GlobSet {
            patterns: Vec::new(),
        }
    }
}

/// Classify each path into the first matching bucket, in the order
/// ignore -> major -> minor -> patch -> unclassified.
pub(crate) fn classify(paths: &[String], cfg: &PatternConfig) -> ChangeClassification {
    let mut out = ChangeClassification {
        total: paths.len(),
        ..Default::default()
    };
    for path in paths {
        if cfg.ignore.matches(path) {
            out.ignored.push(path.clone());
        } else if cfg.major.matches(path) {
            out.major.push(path.clone());
        } else if cfg.minor.matches(path) {
            out.minor.push(path.clone());
        } else if cfg.patch.matches(path) {
            out.patch.push(path.clone());
        } else {
            out.unclassified.push(path.clone());
        }
    }
    out
}

/// Apply spec §4.D's `determine_bump` algorithm.
pub(crate) fn determine_bump(classification: &ChangeClassification, cfg: &PatternConfig) -> (BumpType, bool) {
    if classification.total == 0 {
        return (BumpType::None, false);
    }
    if cfg.source_only_mode && classification.all_ignored() {
        return (BumpType::None, true);
    }
    if classification.all_ignored() {
        return (BumpType::None, true);
    }

    let bump = if !classification.major.is_empty() {
        BumpType::Major
    } else if !classification.minor.is_empty() {
        BumpType::Minor
    } else if !classification.patch.is_empty() {
        BumpType::Patch
    } else if !classification.unclassified.is_empty() {
        cfg.minimum_bump
    } else {
        BumpType::None
    };

    (bump.max(cfg.minimum_bump), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(ignore: &[&str], major: &[&str], minor: &[&str], patch: &[&str]) -> PatternConfig {
        PatternConfig {
            ignore: GlobSet::compile(&ignore.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
            major: GlobSet::compile(&major.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
            minor: GlobSet::compile(&minor.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
            patch: GlobSet::compile(&patch.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
            source_only_mode: false,
            minimum_bump: BumpType::Patch,
        }
    }

    #[test]
    fn first_bucket_wins() {
        let c = cfg(&["**/*.md"], &["src/api/**"], &[], &[]);
        let classification = classify(
            &["src/api/mod.rs".to_string(), "README.md".to_string()],
            &c,
        );
        assert_eq!(classification.major, vec!["src/api/mod.rs"]);
        assert_eq!(classification.ignored, vec!["README.md"]);
    }

    #[test]
    fn all_ignored_yields_no_bump() {
        let c = cfg(&["**/*.md"], &[], &[], &[]);
        let classification = classify(&["README.md".to_string()], &c);
        let (bump, should_ignore) = determine_bump(&classification, &c);
        assert_eq!(bump, BumpType::None);
        assert!(should_ignore);
    }

    #[test]
    fn unclassified_falls_back_to_minimum_bump() {
        let c = cfg(&[], &[], &[], &[]);
        let classification = classify(&["weird/path.xyz".to_string()], &c);
        let (bump, _) = determine_bump(&classification, &c);
        assert_eq!(bump, BumpType::Patch);
    }

    #[test]
    fn minimum_bump_is_a_floor() {
        let mut c = cfg(&[], &[], &[], &["src/**"]);
        c.minimum_bump = BumpType::Minor;
        let classification = classify(&["src/lib.rs".to_string()], &c);
        let (bump, _) = determine_bump(&classification, &c);
        assert_eq!(bump, BumpType::Minor);
    }

    #[test]
    fn double_star_matches_nested_directories() {
        let set = GlobSet::compile(&["src/**/*.rs".to_string()]);
        assert!(set.matches("src/a/b/c.rs"));
        assert!(!set.matches("docs/a.rs"));
    }
}
