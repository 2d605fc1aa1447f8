//! Version Resolver (spec component J) — the orchestrator.
//!
//! Combines components A–I to produce the final [`VersionResult`] for one
//! project at one commit, following the state machine described in spec
//! §4.J.

use log::{debug, info};

use crate::bump::BumpType;
use crate::calver;
use crate::change_detector::{self, DetectedChange};
use crate::config::{PrereleaseType, ResolutionRequest, Scheme};
use crate::git::{BranchType, CreateTagOutcome, GitAdapter};
use crate::result::{BranchKind, VersionResult};
use crate::tags::{self, ProjectTagPatterns, Scope, VersionTag};
use crate::validator;
use crate::Error;
use crate::Version;

/// Create the tag for a resolved version (spec §6 "Tag creation
/// interface"): a major release (`M.0.0`, no prerelease) produces the
/// global tag `<prefix><version>`; any other version produces the
/// project-scoped tag `<name>/<prefix><version>`.
pub fn create_tag(
    request: &ResolutionRequest,
    result: &VersionResult,
    message: Option<&str>,
    dry_run: bool,
) -> Result<CreateTagOutcome, Error> {
    let git = GitAdapter::open(&request.repo_root)?;
    let is_major_release = result.version.minor == 0
        && result.version.patch == 0
        && !result.version.is_prerelease();
    let label = if is_major_release {
        format!("{}{}", request.tag_prefix, result.version_string)
    } else {
        format!(
            "{}/{}{}",
            request.project.name, request.tag_prefix, result.version_string
        )
    };
    git.create_tag(&label, message, None, dry_run)
}

/// Resolve a fully-qualified version for one project at the current HEAD
/// (spec §6 `resolve(request) -> result`).
pub fn resolve(request: &ResolutionRequest) -> Result<VersionResult, Error> {
    let git = GitAdapter::open(&request.repo_root)?;

    let branch_name = request
        .branch_type_override
        .clone()
        .or_else(|| git.current_branch());
    let branch_type = branch_name
        .as_deref()
        .map(|n| git.branch_type(n))
        .unwrap_or(BranchType::Main);

    let commit_id = git.head_sha().unwrap_or_default();
    let commit_date = git.head_commit_date().unwrap_or_default();
    let commit_message = git.head_commit_message().unwrap_or_default();

    // START: short-circuits before any tag resolution or diffing happens.
    if let Some(forced) = &request.force_version {
        info!("version forced to {forced}");
        return Ok(emit(
            forced.clone(),
            None,
            &branch_type,
            branch_name,
            0,
            BumpType::None,
            "forced version".to_string(),
            &commit_id,
            commit_date,
            &commit_message,
            request,
            false,
        ));
    }

    if request.project.is_test && request.skip_tests {
        let base = tags::resolve_base(
            &git.tags().unwrap_or_default(),
            &request.project.name,
            &request.tag_prefix,
            &branch_type,
            request.base_version.as_ref(),
            &ProjectTagPatterns::default(),
        );
        return Ok(emit(
            base.version.clone(),
            Some(base.version),
            &branch_type,
            branch_name,
            0,
            BumpType::None,
            "test project: skipped, using base version".to_string(),
            &commit_id,
            commit_date,
            &commit_message,
            request,
            false,
        ));
    }

    if !request.project.is_packable && request.skip_non_packable {
        let base = tags::resolve_base(
            &git.tags().unwrap_or_default(),
            &request.project.name,
            &request.tag_prefix,
            &branch_type,
            request.base_version.as_ref(),
            &ProjectTagPatterns::default(),
        );
        return Ok(emit(
            base.version.clone(),
            Some(base.version),
            &branch_type,
            branch_name,
            0,
            BumpType::None,
            "non-packable project: skipped, using base version".to_string(),
            &commit_id,
            commit_date,
            &commit_message,
            request,
            false,
        ));
    }

    // RESOLVE_TAGS
    let raw_tags = git.tags().unwrap_or_default();
    let base = tags::resolve_base(
        &raw_tags,
        &request.project.name,
        &request.tag_prefix,
        &branch_type,
        request.base_version.as_ref(),
        &ProjectTagPatterns::default(),
    );
    debug!("resolved base tag: {} ({:?})", base.label, base.scope);

    if request.scheme == Scheme::CalVer {
        return Ok(resolve_calver(&git, &base, &branch_type, branch_name, request, &commit_id, commit_date, &commit_message));
    }

    // DETECT_CHANGES
    let detected = change_detector::detect(
        &git,
        base.commit,
        &request.project.path,
        &request.project.dependency_paths,
        &request.change_detection,
        &request.pattern_config,
        &request.conventional_commits,
    )?;

    if detected.is_initial {
        return Ok(resolve_initial(&base, &branch_type, branch_name, request, &commit_id, commit_date, &commit_message));
    }

    if !detected.changed {
        let reason = no_change_reason(&base);
        return Ok(emit(
            base.version.clone(),
            Some(base.version),
            &branch_type,
            branch_name,
            0,
            BumpType::None,
            reason,
            &commit_id,
            commit_date,
            &commit_message,
            request,
            false,
        ));
    }

    // DETERMINE_BUMP: take the maximum of the detected bump and the
    // configured default-increment floor.
    let bump = detected.bump.max(request.default_increment);

    let height = git.commit_height(base.commit, None).unwrap_or(0);

    // APPLY_BRANCH_RULES
    let (candidate, reason) = apply_branch_rules(&base, bump, &branch_type, height, request);

    Ok(emit(
        candidate,
        Some(base.version),
        &branch_type,
        branch_name,
        height,
        bump,
        reason,
        &commit_id,
        commit_date,
        &commit_message,
        request,
        true,
    ))
}

fn no_change_reason(base: &VersionTag) -> String {
    match &base.scope {
        Scope::Project(name) if !base.is_virtual() => {
            format!("no changes: using existing project tag for {name}")
        }
        Scope::Global if !base.is_virtual() => "no changes: using existing global tag".to_string(),
        _ if base.is_configured() => "no changes: using configured base version".to_string(),
        _ => "no changes: using default base version".to_string(),
    }
}

fn resolve_initial(
    base: &VersionTag,
    branch_type: &BranchType,
    branch_name: Option<String>,
    request: &ResolutionRequest,
    commit_id: &str,
    commit_date: i64,
    commit_message: &str,
) -> VersionResult {
    if base.is_configured() {
        // First-use-of-configured-base rule (spec §4.J).
        return emit(
            base.version.clone(),
            None,
            branch_type,
            branch_name,
            0,
            BumpType::None,
            "first change with new base version from configuration".to_string(),
            commit_id,
            commit_date,
            commit_message,
            request,
            true,
        );
    }

    // Truly initial repository: no increment, only the configured
    // prerelease label (if any) is appended.
    let version = match request.prerelease_type.label() {
        Some(label) => base.version.clone().with_prerelease(label, 1),
        None => base.version.clone(),
    };
    let reason = match request.prerelease_type.label() {
        Some(label) => format!("Initial repository: Adding {label} prerelease"),
        None => "Initial repository: using default base version".to_string(),
    };
    emit(
        version,
        None,
        branch_type,
        branch_name,
        0,
        BumpType::None,
        reason,
        commit_id,
        commit_date,
        commit_message,
        request,
        true,
    )
}

fn apply_branch_rules(
    base: &VersionTag,
    bump: BumpType,
    branch_type: &BranchType,
    height: u32,
    request: &ResolutionRequest,
) -> (Version, String) {
    let version = &base.version;
    match branch_type {
        BranchType::Main => {
            if let Some(label) = version.prerelease_label() {
                if matches!(label.as_str(), "alpha" | "beta" | "rc") {
                    return (version.with_incremented_prerelease(), "Prerelease progression".to_string());
                }
            }
            let incremented = increment(version, bump);
            match request.prerelease_type.label() {
                Some(label) => (
                    incremented.with_prerelease(label, 1),
                    format!("Main: {bump} + {label}"),
                ),
                None => (incremented, format!("Main: {bump}")),
            }
        }
        BranchType::Dev => {
            let incremented = increment(version, bump);
            let candidate = incremented.with_prerelease("dev", height as u64);
            (candidate, format!("Dev branch {bump} bump + dev.{height}"))
        }
        BranchType::Release { major, minor, patch } => {
            // If a non-virtual tag already exists in this release's series,
            // the next patch increments from it (spec §4.J); otherwise the
            // branch name's own patch component (or 0) seeds the series.
            let candidate = if !base.is_virtual() && version.major == *major && version.minor == *minor
            {
                Version::new(*major, *minor, version.patch + 1)
            } else {
                Version::new(*major, *minor, patch.unwrap_or(0))
            };
            (candidate, format!("Release branch locks ({major},{minor}); no prerelease"))
        }
        BranchType::Feature(name) => {
            let incremented = increment(version, bump);
            let sanitized = sanitize_feature_name(name);
            let candidate = incremented.with_prerelease(&sanitized, height as u64);
            (candidate, format!("Feature branch {bump} bump"))
        }
    }
}

fn increment(base: &Version, bump: BumpType) -> Version {
    match bump {
        BumpType::Major => Version::new(base.major + 1, 0, 0),
        BumpType::Minor => Version::new(base.major, base.minor + 1, 0),
        BumpType::Patch | BumpType::None => Version::new(base.major, base.minor, base.patch + 1),
    }
}

/// Strip common prefixes, replace non-alphanumeric/hyphen runs with a
/// single hyphen, lowercase, trim, cap at 50 code points, falling back to
/// `"feature"` (spec §4.J Feature rule; §9 "Unicode pitfalls" — operate on
/// code points, not bytes).
fn sanitize_feature_name(name: &str) -> String {
    let stripped = name
        .strip_prefix("feature/")
        .or_else(|| name.strip_prefix("feat/"))
        .or_else(|| name.strip_prefix("feature-"))
        .unwrap_or(name);

    let mut out = String::new();
    let mut last_was_hyphen = false;
    for ch in stripped.chars() {
        let mapped = if ch.is_ascii_alphanumeric() || ch == '-' {
            ch.to_ascii_lowercase()
        } else {
            '-'
        };
        if mapped == '-' {
            if !last_was_hyphen && !out.is_empty() {
                out.push('-');
            }
            last_was_hyphen = true;
        } else {
            out.push(mapped);
            last_was_hyphen = false;
        }
    }
    let trimmed = out.trim_matches('-');
    let capped: String = trimmed.chars().take(50).collect();
    if capped.is_empty() {
        "feature".to_string()
    } else {
        capped
    }
}

fn resolve_calver(
    git: &GitAdapter,
    base: &VersionTag,
    branch_type: &BranchType,
    branch_name: Option<String>,
    request: &ResolutionRequest,
    commit_id: &str,
    commit_date: i64,
    commit_message: &str,
) -> VersionResult {
    let date = chrono::DateTime::from_timestamp(commit_date, 0)
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let previous = if base.is_virtual() { None } else { Some(&base.version) };
    let version = calver::calculate(date, previous, &request.calver);
    let height = git.commit_height(base.commit, None).unwrap_or(0);
    emit(
        version,
        previous.cloned(),
        branch_type,
        branch_name,
        height,
        BumpType::None,
        "CalVer resolution".to_string(),
        commit_id,
        commit_date,
        commit_message,
        request,
        true,
    )
}

#[allow(clippy::too_many_arguments)]
fn emit(
    version: Version,
    previous_version: Option<Version>,
    branch_type: &BranchType,
    branch_name: Option<String>,
    commit_height: u32,
    bump_type: BumpType,
    change_reason: String,
    commit_id: &str,
    commit_date: i64,
    commit_message: &str,
    request: &ResolutionRequest,
    version_changed: bool,
) -> VersionResult {
    let report = validator::validate(
        &version,
        previous_version.as_ref(),
        &request.constraints,
        bump_type,
        request.major_approved,
    );
    if !report.is_valid {
        info!("validation failed for {version}: {:?}", report.errors);
    }

    VersionResult {
        version_string: version.to_string(),
        version,
        previous_version,
        previous_commit_id: None,
        commit_id: commit_id.to_string(),
        commit_date,
        commit_message: commit_message.to_string(),
        branch_type: BranchKind::from(branch_type),
        branch_name,
        commit_height,
        bump_type,
        change_reason,
        scheme: request.scheme,
        version_changed,
        validation: report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("feature/new-feature", "new-feature")]
    #[case::feat_prefix("feat/login-flow", "login-flow")]
    #[case::special_chars("feature/JIRA-123_fix thing!", "jira-123-fix-thing")]
    #[case::empty_falls_back("feature/", "feature")]
    fn sanitizes_feature_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize_feature_name(raw), expected);
    }

    #[test]
    fn sanitized_name_is_capped_at_50_code_points() {
        let long_name = format!("feature/{}", "a".repeat(80));
        assert_eq!(sanitize_feature_name(&long_name).chars().count(), 50);
    }

    #[test]
    fn increment_resets_lower_components() {
        let base = Version::new(1, 2, 3);
        assert_eq!(increment(&base, BumpType::Major).to_string(), "2.0.0");
        assert_eq!(increment(&base, BumpType::Minor).to_string(), "1.3.0");
        assert_eq!(increment(&base, BumpType::Patch).to_string(), "1.2.4");
    }
}
