//! Tag Resolver (spec component C).
//!
//! Classifies the raw tags the git adapter returns into global and
//! project-scoped candidates, orders them, and selects the base version a
//! resolution increments from.

use git2::Oid;
use log::debug;

use crate::git::{BranchType, RawTag};
use crate::version::PrereleaseClass;
use crate::Version;

/// Scope a tag belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Scope {
    Global,
    Project(String),
}

/// A tag paired with its parsed version and scope (spec §3 `VersionTag`).
/// A tag with `commit = None` is *virtual*: synthesized from configuration
/// rather than read from the repository.
#[derive(Debug, Clone)]
pub(crate) struct VersionTag {
    pub(crate) label: String,
    pub(crate) version: Version,
    pub(crate) commit: Option<Oid>,
    pub(crate) scope: Scope,
    /// True when this virtual tag was synthesized from a caller-configured
    /// base version, as opposed to the `0.1.0` default fallback — the two
    /// take different paths through the resolver's "first use" handling
    /// (spec §4.J "First-use-of-configured-base rule").
    pub(crate) from_configured_base: bool,
}

impl VersionTag {
    pub(crate) fn virtual_tag(version: Version, from_configured_base: bool) -> VersionTag {
        VersionTag {
            label: version.to_string(),
            version,
            commit: None,
            scope: Scope::Global,
            from_configured_base,
        }
    }

    pub(crate) fn is_virtual(&self) -> bool {
        self.commit.is_none()
    }

    pub(crate) fn is_configured(&self) -> bool {
        self.from_configured_base
    }
}

/// Additional caller-supplied patterns a project tag may match, with
/// `{name}`/`{prefix}` placeholders (spec §4.C).
#[derive(Debug, Clone, Default)]
pub(crate) struct ProjectTagPatterns {
    pub(crate) extra_patterns: Vec<String>,
}

fn project_prefixes(project_name: &str, tag_prefix: &str, extra: &ProjectTagPatterns) -> Vec<String> {
    let lower = project_name.to_ascii_lowercase();
    let mut prefixes = vec![
        format!("{lower}-{tag_prefix}"),
        format!("{project_name}-{tag_prefix}"),
        format!("{project_name}/{tag_prefix}"),
        format!("{lower}/{tag_prefix}"),
    ];
    for pattern in &extra.extra_patterns {
        prefixes.push(
            pattern
                .replace("{name}", project_name)
                .replace("{prefix}", tag_prefix),
        );
    }
    prefixes
}

/// Classify a raw tag as a global candidate, iff its label starts with
/// `tag_prefix`.
fn as_global_candidate(raw: &RawTag, tag_prefix: &str) -> Option<VersionTag> {
    let label = raw.label.strip_prefix(tag_prefix)?;
    let version = Version::parse(label).ok()?;
    Some(VersionTag {
        label: raw.label.clone(),
        version,
        commit: raw.commit,
        scope: Scope::Global,
        from_configured_base: false,
    })
}

/// Classify a raw tag as a project candidate for `project_name`. Suffix
/// form (`prefix<V>-<name>`) is explicitly not accepted (spec §4.C).
fn as_project_candidate(
    raw: &RawTag,
    project_name: &str,
    tag_prefix: &str,
    patterns: &ProjectTagPatterns,
) -> Option<VersionTag> {
    for candidate_prefix in project_prefixes(project_name, tag_prefix, patterns) {
        if let Some(rest) = raw.label.strip_prefix(&candidate_prefix) {
            if let Ok(version) = Version::parse(rest) {
                return Some(VersionTag {
                    label: raw.label.clone(),
                    version,
                    commit: raw.commit,
                    scope: Scope::Project(project_name.to_string()),
                    from_configured_base: false,
                });
            }
        }
    }
    None
}

/// Order candidates descending by (major, minor, patch, prerelease-class,
/// prerelease-number), after filtering by branch-type gating.
fn rank_key(tag: &VersionTag) -> (u32, u32, u32, PrereleaseClass, u64) {
    (
        tag.version.major,
        tag.version.minor,
        tag.version.patch,
        tag.version.prerelease_class(),
        tag.version.prerelease_number().unwrap_or(0),
    )
}

fn gate_by_branch(candidates: Vec<VersionTag>, branch: &BranchType) -> Vec<VersionTag> {
    match branch.release_series() {
        Some((major, minor)) => candidates
            .into_iter()
            .filter(|t| t.version.major == major && t.version.minor == minor)
            .collect(),
        None => candidates,
    }
}

fn best_candidate(mut candidates: Vec<VersionTag>, branch: &BranchType) -> Option<VersionTag> {
    candidates = gate_by_branch(candidates, branch);
    candidates.sort_by(|a, b| rank_key(b).cmp(&rank_key(a)));
    candidates.into_iter().next()
}

/// Resolve the base version for this resolution (spec §4.C "Base
/// selection").
pub(crate) fn resolve_base(
    raw_tags: &[RawTag],
    project_name: &str,
    tag_prefix: &str,
    branch: &BranchType,
    configured_base: Option<&Version>,
    extra_patterns: &ProjectTagPatterns,
) -> VersionTag {
    let globals: Vec<VersionTag> = raw_tags
        .iter()
        .filter_map(|t| as_global_candidate(t, tag_prefix))
        .collect();
    let projects: Vec<VersionTag> = raw_tags
        .iter()
        .filter_map(|t| as_project_candidate(t, project_name, tag_prefix, extra_patterns))
        .collect();

    let global = best_candidate(globals, branch);
    let project = best_candidate(projects, branch);

    match (global, project) {
        (Some(global), Some(project)) => {
            let global_series = (global.version.major, global.version.minor);
            let project_series = (project.version.major, project.version.minor);
            if global_series > project_series {
                debug!("tag resolver: new release cycle, global tag wins over project tag");
                global
            } else {
                project
            }
        }
        (None, Some(project)) => project,
        (Some(global), None) => global,
        (None, None) => match configured_base {
            Some(version) => VersionTag::virtual_tag(version.clone(), true),
            None => VersionTag::virtual_tag(Version::new(0, 1, 0), false),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(label: &str) -> RawTag {
        RawTag {
            label: label.to_string(),
            commit: Some(Oid::from_bytes(&[1; 20]).unwrap()),
        }
    }

    #[test]
    fn global_tag_selected_when_no_project_tag() {
        let tags = vec![raw("v1.0.0")];
        let base = resolve_base(&tags, "demo", "v", &BranchType::Main, None, &Default::default());
        assert_eq!(base.version.to_string(), "1.0.0");
        assert_eq!(base.scope, Scope::Global);
    }

    #[test]
    fn project_tag_wins_over_older_global_series() {
        let tags = vec![raw("v1.0.0"), raw("demo/v1.2.0")];
        let base = resolve_base(&tags, "demo", "v", &BranchType::Main, None, &Default::default());
        assert_eq!(base.version.to_string(), "1.2.0");
        assert_eq!(base.scope, Scope::Project("demo".into()));
    }

    #[test]
    fn global_wins_on_new_release_cycle() {
        let tags = vec![raw("v2.0.0"), raw("demo/v1.2.0")];
        let base = resolve_base(&tags, "demo", "v", &BranchType::Main, None, &Default::default());
        assert_eq!(base.version.to_string(), "2.0.0");
        assert_eq!(base.scope, Scope::Global);
    }

    #[test]
    fn falls_back_to_configured_base() {
        let base = resolve_base(
            &[],
            "demo",
            "v",
            &BranchType::Main,
            Some(&Version::new(3, 0, 0)),
            &Default::default(),
        );
        assert!(base.is_virtual());
        assert_eq!(base.version.to_string(), "3.0.0");
    }

    #[test]
    fn falls_back_to_default_0_1_0() {
        let base = resolve_base(&[], "demo", "v", &BranchType::Main, None, &Default::default());
        assert_eq!(base.version.to_string(), "0.1.0");
    }

    #[test]
    fn release_branch_gates_to_matching_series() {
        let tags = vec![raw("v1.0.0"), raw("v1.1.0"), raw("v2.0.0")];
        let release = BranchType::classify("release/1.1");
        let base = resolve_base(&tags, "demo", "v", &release, None, &Default::default());
        assert_eq!((base.version.major, base.version.minor), (1, 1));
    }

    #[test]
    fn suffix_form_project_tag_is_not_accepted() {
        let tags = vec![raw("v1.2.3-demo")];
        let base = resolve_base(&tags, "demo", "v", &BranchType::Main, None, &Default::default());
        // Treated as a global candidate with an (ambiguous, per spec §9.1) prerelease label.
        assert_eq!(base.scope, Scope::Global);
    }
}
