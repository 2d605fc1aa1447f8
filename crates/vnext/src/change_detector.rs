//! Change Detector (spec component F).
//!
//! Combines the Git Adapter (B), File Pattern Matcher (D), and Commit
//! Classifier (E) to decide whether a project changed since its base tag,
//! and what bump that change requires.

use std::path::{Path, PathBuf};

use crate::bump::BumpType;
use crate::conventional::{classify_range, ConventionalCommitsConfig};
use crate::git::GitAdapter;
use crate::patterns::{classify, determine_bump, PatternConfig};

/// Configuration for a single change-detection pass (spec §4.F / §6
/// `changeDetection.*`).
#[derive(Debug, Clone, Default)]
pub struct ChangeDetectionConfig {
    pub enabled: bool,
    pub submodule_support: bool,
    pub dependency_lock_file: Option<String>,
}

/// Result of a single change-detection pass.
#[derive(Debug, Clone)]
pub(crate) struct DetectedChange {
    pub(crate) changed: bool,
    pub(crate) is_initial: bool,
    pub(crate) bump: BumpType,
    pub(crate) should_ignore: bool,
}

/// Run change detection for one project against a (possibly virtual) base
/// commit.
#[allow(clippy::too_many_arguments)]
pub(crate) fn detect(
    git: &GitAdapter,
    base_commit: Option<git2::Oid>,
    project_path: &Path,
    dependency_paths: &[PathBuf],
    detection_cfg: &ChangeDetectionConfig,
    pattern_cfg: &PatternConfig,
    commit_cfg: &ConventionalCommitsConfig,
) -> Result<DetectedChange, crate::Error> {
    // Step 1: a virtual base means "treat the repository as initial" per
    // spec §4.F.1 — the caller (resolver) decides how to emit this.
    if base_commit.is_none() {
        return Ok(DetectedChange {
            changed: true,
            is_initial: true,
            bump: BumpType::None,
            should_ignore: false,
        });
    }

    let diffs = match git.diff_paths(base_commit, None) {
        Ok(d) => d,
        Err(e) => {
            // spec §7 GitOperationFailed: stay conservative.
            log::warn!("git diff failed, assuming changes are present: {e}");
            return Ok(DetectedChange {
                changed: true,
                is_initial: false,
                bump: BumpType::Patch,
                should_ignore: false,
            });
        }
    };

    let project_prefix = normalize(project_path);
    let dependency_prefixes: Vec<String> = dependency_paths.iter().map(|p| normalize(p)).collect();
    let lock_file = detection_cfg.dependency_lock_file.as_deref();

    let relevant: Vec<String> = diffs
        .iter()
        .filter(|d| {
            let in_project = project_prefix.is_empty() || d.path.starts_with(&project_prefix);
            let in_dependency = dependency_prefixes.iter().any(|p| d.path.starts_with(p));
            let is_lock_file = lock_file.is_some_and(|f| d.path == f);
            let is_submodule_link = detection_cfg.submodule_support
                && (d.is_submodule || d.path == ".gitmodules");
            in_project || in_dependency || is_lock_file || is_submodule_link
        })
        .map(|d| d.path.clone())
        .collect();

    if relevant.is_empty() {
        return Ok(DetectedChange {
            changed: false,
            is_initial: false,
            bump: BumpType::None,
            should_ignore: false,
        });
    }

    if !detection_cfg.enabled {
        // Pattern matching disabled: mere existence of any path sets bump = Patch.
        return Ok(DetectedChange {
            changed: true,
            is_initial: false,
            bump: BumpType::Patch,
            should_ignore: false,
        });
    }

    let classification = classify(&relevant, pattern_cfg);
    let (file_bump, should_ignore) = determine_bump(&classification, pattern_cfg);

    let messages = git.commit_messages_since(base_commit)?;
    let commit_bump = classify_range(&messages, commit_cfg);

    let bump = file_bump.max(commit_bump);

    Ok(DetectedChange {
        changed: !should_ignore,
        is_initial: false,
        bump,
        should_ignore,
    })
}

/// Normalize a project-relative path for prefix matching against diff
/// paths. `.` (the repo root) normalizes to the empty string so that
/// `project_prefix.is_empty()` — "this project is the whole repo" — holds
/// for the common single-project layout.
fn normalize(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    if normalized == "." {
        String::new()
    } else {
        normalized
    }
}
