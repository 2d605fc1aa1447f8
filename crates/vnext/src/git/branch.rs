//! Branch classification (spec §3 `BranchType`).

use regex::Regex;
use std::sync::OnceLock;

use crate::Version;

/// Sum type over the branch kinds the resolver's branch rules switch on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BranchType {
    Main,
    Dev,
    Release {
        major: u32,
        minor: u32,
        patch: Option<u32>,
    },
    Feature(String),
}

fn release_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:release[/-]|v)(\d+)\.(\d+)(?:\.(\d+))?$").expect("valid regex")
    })
}

impl BranchType {
    /// Classify a branch name per spec §3: `main`/`master` -> Main;
    /// `dev`/`develop`/`development` -> Dev; `release/<v>`, `release-<v>`,
    /// or `v<M.N[.P]>` -> Release; otherwise Feature.
    pub(crate) fn classify(name: &str) -> BranchType {
        match name {
            "main" | "master" => return BranchType::Main,
            "dev" | "develop" | "development" => return BranchType::Dev,
            _ => {}
        }
        if let Some(caps) = release_pattern().captures(name) {
            let major = caps[1].parse().unwrap_or(0);
            let minor = caps[2].parse().unwrap_or(0);
            let patch = caps.get(3).and_then(|m| m.as_str().parse().ok());
            return BranchType::Release {
                major,
                minor,
                patch,
            };
        }
        BranchType::Feature(name.to_string())
    }

    pub(crate) fn release_series(&self) -> Option<(u32, u32)> {
        match self {
            BranchType::Release { major, minor, .. } => Some((*major, *minor)),
            _ => None,
        }
    }

    pub(crate) fn release_base_version(&self) -> Option<Version> {
        match self {
            BranchType::Release {
                major,
                minor,
                patch,
            } => Some(Version::new(*major, *minor, patch.unwrap_or(0))),
            _ => None,
        }
    }
}
