//! Policy Engine (spec component G).
//!
//! Maps a project to a version group and coordinates grouped/lockstep
//! versioning across projects.

use crate::error::Error;
use crate::Version;

/// Versioning strategy for a group of projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Independent,
    LockStep,
}

/// The repository-wide policy (spec §4.G).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    #[default]
    Independent,
    LockStep,
    Grouped,
}

/// A named group of projects sharing a strategy.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub patterns: Vec<String>,
    pub strategy: Strategy,
    pub base_version: Option<Version>,
}

#[derive(Debug, Clone, Default)]
pub struct VersionPolicyConfig {
    pub policy: Policy,
    pub groups: Vec<Group>,
}

fn pattern_matches(pattern: &str, name: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return name.starts_with(prefix);
    }
    pattern == name
}

impl VersionPolicyConfig {
    /// Validate the group configuration (spec §4.G "Validation").
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let mut seen_projects: Vec<(&str, &str)> = Vec::new();
        for group in &self.groups {
            if group.patterns.is_empty() {
                return Err(Error::ConfigurationInvalid(format!(
                    "group {:?} has no project patterns",
                    group.name
                )));
            }
            if let Some(base) = &group.base_version {
                if base.major == 0 && base.minor == 0 && base.patch == 0 && base.is_prerelease() {
                    return Err(Error::ConfigurationInvalid(format!(
                        "group {:?} has an invalid base version",
                        group.name
                    )));
                }
            }
        }
        for (i, a) in self.groups.iter().enumerate() {
            for pattern in &a.patterns {
                for b in self.groups.iter().skip(i + 1) {
                    for other_pattern in &b.patterns {
                        if pattern == other_pattern {
                            seen_projects.push((a.name.as_str(), b.name.as_str()));
                        }
                    }
                }
            }
        }
        if let Some((a, b)) = seen_projects.first() {
            return Err(Error::ConfigurationInvalid(format!(
                "project pattern claimed by both group {a:?} and group {b:?}"
            )));
        }
        Ok(())
    }

    /// Return the first group whose patterns match `name`.
    pub(crate) fn project_group(&self, name: &str) -> Option<&Group> {
        self.groups
            .iter()
            .find(|g| g.patterns.iter().any(|p| pattern_matches(p, name)))
    }

    /// The set of project names that share a version with `name`.
    pub(crate) fn linked_projects(&self, name: &str, all_projects: &[String]) -> Vec<String> {
        match self.policy {
            Policy::Independent => vec![name.to_string()],
            Policy::LockStep => all_projects.to_vec(),
            Policy::Grouped => match self.project_group(name) {
                Some(group) if group.strategy == Strategy::Independent => vec![name.to_string()],
                Some(group) => all_projects
                    .iter()
                    .filter(|p| group.patterns.iter().any(|pat| pattern_matches(pat, p)))
                    .cloned()
                    .collect(),
                None => vec![name.to_string()],
            },
        }
    }

    /// Coordinate the version for a group: its configured base if set,
    /// else the maximum of all members' computed versions, else `0.1.0`.
    pub(crate) fn coordinate_group_version(
        &self,
        versions: &[Version],
        group: Option<&Group>,
    ) -> Version {
        if let Some(group) = group {
            if let Some(base) = &group.base_version {
                return base.clone();
            }
        }
        versions
            .iter()
            .max()
            .cloned()
            .unwrap_or_else(|| Version::new(0, 1, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, patterns: &[&str]) -> Group {
        Group {
            name: name.to_string(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            strategy: Strategy::Independent,
            base_version: None,
        }
    }

    #[test]
    fn wildcard_pattern_matches_everything() {
        let cfg = VersionPolicyConfig {
            policy: Policy::Grouped,
            groups: vec![group("all", &["*"])],
        };
        assert_eq!(cfg.project_group("anything").unwrap().name, "all");
    }

    #[test]
    fn prefix_wildcard_matches() {
        let cfg = VersionPolicyConfig {
            policy: Policy::Grouped,
            groups: vec![group("libs", &["lib-*"])],
        };
        assert!(cfg.project_group("lib-core").is_some());
        assert!(cfg.project_group("app-core").is_none());
    }

    #[test]
    fn duplicate_pattern_across_groups_is_a_configuration_error() {
        let cfg = VersionPolicyConfig {
            policy: Policy::Grouped,
            groups: vec![group("a", &["shared"]), group("b", &["shared"])],
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_group_is_a_configuration_error() {
        let cfg = VersionPolicyConfig {
            policy: Policy::Grouped,
            groups: vec![group("empty", &[])],
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn grouped_with_independent_strategy_does_not_link_members() {
        let cfg = VersionPolicyConfig {
            policy: Policy::Grouped,
            groups: vec![group("libs", &["lib-*"])],
        };
        let all = vec!["lib-a".to_string(), "lib-b".to_string()];
        assert_eq!(cfg.linked_projects("lib-a", &all), vec!["lib-a".to_string()]);
    }

    #[test]
    fn grouped_with_lockstep_strategy_links_matching_members() {
        let mut g = group("libs", &["lib-*"]);
        g.strategy = Strategy::LockStep;
        let cfg = VersionPolicyConfig {
            policy: Policy::Grouped,
            groups: vec![g],
        };
        let all = vec!["lib-a".to_string(), "lib-b".to_string(), "app".to_string()];
        assert_eq!(
            cfg.linked_projects("lib-a", &all),
            vec!["lib-a".to_string(), "lib-b".to_string()]
        );
    }

    #[test]
    fn lockstep_links_all_projects() {
        let cfg = VersionPolicyConfig {
            policy: Policy::LockStep,
            groups: vec![],
        };
        let all = vec!["a".to_string(), "b".to_string()];
        assert_eq!(cfg.linked_projects("a", &all), all);
    }

    #[test]
    fn coordinate_uses_group_base_when_set() {
        let mut g = group("g", &["*"]);
        g.base_version = Some(Version::new(2, 0, 0));
        let cfg = VersionPolicyConfig {
            policy: Policy::Grouped,
            groups: vec![g.clone()],
        };
        let result = cfg.coordinate_group_version(&[Version::new(1, 0, 0)], Some(&g));
        assert_eq!(result.to_string(), "2.0.0");
    }

    #[test]
    fn coordinate_falls_back_to_default() {
        let cfg = VersionPolicyConfig::default();
        let result = cfg.coordinate_group_version(&[], None);
        assert_eq!(result.to_string(), "0.1.0");
    }
}
