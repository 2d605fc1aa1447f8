//! Configuration surface (spec §6).
//!
//! Follows the builder pattern of the teacher's `CalculatorConfig`: chained
//! `set_*`/`with_*` methods that consume and return `Self`, and a final
//! `.build()` that validates and produces the immutable [`ResolutionRequest`]
//! [`crate::resolve`] consumes.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::calver::CalVerConfig;
use crate::change_detector::ChangeDetectionConfig;
use crate::conventional::ConventionalCommitsConfig;
use crate::error::Error;
use crate::patterns::PatternConfig;
use crate::policy::VersionPolicyConfig;
use crate::project::ProjectIdentity;
use crate::validator::Constraints;
use crate::Version;

/// Which prerelease label, if any, the resolver appends on main-branch
/// increments (spec §6 `prereleaseType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PrereleaseType {
    #[default]
    None,
    Alpha,
    Beta,
    Rc,
}

impl PrereleaseType {
    pub(crate) fn label(self) -> Option<&'static str> {
        match self {
            PrereleaseType::None => None,
            PrereleaseType::Alpha => Some("alpha"),
            PrereleaseType::Beta => Some("beta"),
            PrereleaseType::Rc => Some("rc"),
        }
    }
}

impl fmt::Display for PrereleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrereleaseType::None => "none",
            PrereleaseType::Alpha => "alpha",
            PrereleaseType::Beta => "beta",
            PrereleaseType::Rc => "rc",
        };
        write!(f, "{s}")
    }
}

/// Default vs. calendar versioning scheme (spec §3 `VersionResult.scheme`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scheme {
    #[default]
    SemVer,
    CalVer,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scheme::SemVer => "semver",
            Scheme::CalVer => "calver",
        };
        write!(f, "{s}")
    }
}

/// The immutable request consumed by [`crate::resolve`] (spec §6).
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    pub(crate) repo_root: PathBuf,
    pub(crate) project: ProjectIdentity,
    pub(crate) branch_type_override: Option<String>,
    pub(crate) force_version: Option<Version>,
    pub(crate) tag_prefix: String,
    pub(crate) default_increment: crate::bump::BumpType,
    pub(crate) prerelease_type: PrereleaseType,
    pub(crate) skip_tests: bool,
    pub(crate) skip_non_packable: bool,
    pub(crate) base_version: Option<Version>,
    pub(crate) conventional_commits: ConventionalCommitsConfig,
    pub(crate) change_detection: ChangeDetectionConfig,
    pub(crate) pattern_config: PatternConfig,
    pub(crate) version_policy: VersionPolicyConfig,
    pub(crate) constraints: Constraints,
    pub(crate) calver: CalVerConfig,
    pub(crate) major_approved: bool,
    pub(crate) scheme: Scheme,
}

/// Builder for [`ResolutionRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    repo_root: PathBuf,
    project: ProjectIdentity,
    branch_type_override: Option<String>,
    force_version: Option<Version>,
    tag_prefix: String,
    default_increment: crate::bump::BumpType,
    prerelease_type: PrereleaseType,
    skip_tests: bool,
    skip_non_packable: bool,
    base_version: Option<Version>,
    conventional_commits: ConventionalCommitsConfig,
    change_detection: ChangeDetectionConfig,
    pattern_config: PatternConfig,
    version_policy: VersionPolicyConfig,
    constraints: Constraints,
    calver: CalVerConfig,
    major_approved: bool,
    scheme: Scheme,
}

impl RequestBuilder {
    /// Start a new request for `project` rooted at `repo_root`.
    ///
    /// The version prefix defaults to `"v"`, matching the teacher's default
    /// convention for tag labels.
    pub fn new(repo_root: impl Into<PathBuf>, project: ProjectIdentity) -> RequestBuilder {
        RequestBuilder {
            repo_root: repo_root.into(),
            project,
            branch_type_override: None,
            force_version: None,
            tag_prefix: "v".to_string(),
            default_increment: crate::bump::BumpType::Patch,
            prerelease_type: PrereleaseType::default(),
            skip_tests: false,
            skip_non_packable: false,
            base_version: None,
            conventional_commits: ConventionalCommitsConfig::default(),
            change_detection: ChangeDetectionConfig::default(),
            pattern_config: PatternConfig::default(),
            version_policy: VersionPolicyConfig::default(),
            constraints: Constraints::default(),
            calver: CalVerConfig::default(),
            major_approved: false,
            scheme: Scheme::default(),
        }
    }

    pub fn set_tag_prefix(mut self, prefix: &str) -> Self {
        self.tag_prefix = prefix.to_string();
        self
    }

    pub fn set_branch_type_override(mut self, branch: &str) -> Self {
        self.branch_type_override = Some(branch.to_string());
        self
    }

    pub fn set_force_version(mut self, version: Version) -> Self {
        self.force_version = Some(version);
        self
    }

    pub fn set_default_increment(mut self, bump: crate::bump::BumpType) -> Self {
        self.default_increment = bump;
        self
    }

    pub fn set_prerelease_type(mut self, prerelease_type: PrereleaseType) -> Self {
        self.prerelease_type = prerelease_type;
        self
    }

    pub fn set_skip_tests(mut self, skip: bool) -> Self {
        self.skip_tests = skip;
        self
    }

    pub fn set_skip_non_packable(mut self, skip: bool) -> Self {
        self.skip_non_packable = skip;
        self
    }

    pub fn set_base_version(mut self, version: Version) -> Self {
        self.base_version = Some(version);
        self
    }

    pub fn set_conventional_commits(mut self, cfg: ConventionalCommitsConfig) -> Self {
        self.conventional_commits = cfg;
        self
    }

    pub fn set_change_detection(mut self, cfg: ChangeDetectionConfig) -> Self {
        self.change_detection = cfg;
        self
    }

    pub fn set_pattern_config(mut self, cfg: PatternConfig) -> Self {
        self.pattern_config = cfg;
        self
    }

    pub fn set_version_policy(mut self, cfg: VersionPolicyConfig) -> Self {
        self.version_policy = cfg;
        self
    }

    pub fn set_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn set_calver(mut self, cfg: CalVerConfig) -> Self {
        self.calver = cfg;
        self
    }

    pub fn set_major_approved(mut self, approved: bool) -> Self {
        self.major_approved = approved;
        self
    }

    pub fn set_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Validate and produce the immutable request.
    pub fn build(self) -> Result<ResolutionRequest, Error> {
        if self.tag_prefix.is_empty() {
            return Err(Error::ConfigurationInvalid(
                "tag prefix must not be empty".to_string(),
            ));
        }
        self.version_policy.validate()?;

        Ok(ResolutionRequest {
            repo_root: self.repo_root,
            project: self.project,
            branch_type_override: self.branch_type_override,
            force_version: self.force_version,
            tag_prefix: self.tag_prefix,
            default_increment: self.default_increment,
            prerelease_type: self.prerelease_type,
            skip_tests: self.skip_tests,
            skip_non_packable: self.skip_non_packable,
            base_version: self.base_version,
            conventional_commits: self.conventional_commits,
            change_detection: self.change_detection,
            pattern_config: self.pattern_config,
            version_policy: self.version_policy,
            constraints: self.constraints,
            calver: self.calver,
            major_approved: self.major_approved,
            scheme: self.scheme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_v_prefix() {
        let request = RequestBuilder::new(".", ProjectIdentity::new("demo", "."))
            .build()
            .unwrap();
        assert_eq!(request.tag_prefix, "v");
    }

    #[test]
    fn rejects_empty_prefix() {
        let result = RequestBuilder::new(".", ProjectIdentity::new("demo", "."))
            .set_tag_prefix("")
            .build();
        assert!(result.is_err());
    }
}
