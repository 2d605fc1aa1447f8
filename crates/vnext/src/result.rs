//! `VersionResult`, the sole externally surfaced product of a resolution
//! (spec §3).

use crate::bump::BumpType;
use crate::config::Scheme;
use crate::git::BranchType;
use crate::validator::ValidationReport;
use crate::Version;

/// Branch classification surfaced on [`VersionResult`], mirroring
/// [`crate::git::BranchType`] but without the crate-private fields so it
/// can be part of the public surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchKind {
    Main,
    Dev,
    Release,
    Feature,
}

impl From<&BranchType> for BranchKind {
    fn from(branch: &BranchType) -> BranchKind {
        match branch {
            BranchType::Main => BranchKind::Main,
            BranchType::Dev => BranchKind::Dev,
            BranchType::Release { .. } => BranchKind::Release,
            BranchType::Feature(_) => BranchKind::Feature,
        }
    }
}

/// The final, fully-qualified result of one resolution (spec §3).
#[derive(Debug, Clone)]
pub struct VersionResult {
    pub version_string: String,
    pub version: Version,
    pub previous_version: Option<Version>,
    pub previous_commit_id: Option<String>,
    pub commit_id: String,
    pub commit_date: i64,
    pub commit_message: String,
    pub branch_type: BranchKind,
    pub branch_name: Option<String>,
    pub commit_height: u32,
    pub bump_type: BumpType,
    pub change_reason: String,
    pub scheme: Scheme,
    pub version_changed: bool,
    pub validation: ValidationReport,
}
