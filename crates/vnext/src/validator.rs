//! Validator (spec component H).
//!
//! Applies constraints — range, blocked list, monotonic increase, approval
//! gate, and custom rules — to a candidate version.

use crate::bump::BumpType;
use crate::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub enum CustomRuleKind {
    Pattern(String),
    Range(String),
}

#[derive(Debug, Clone)]
pub struct CustomRule {
    pub kind: CustomRuleKind,
    pub severity: Severity,
    pub message: String,
}

/// Constraints a resolved version must satisfy (spec §4.H / §6
/// `constraints.*`).
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub blocked: Vec<String>,
    pub minimum_version: Option<Version>,
    pub maximum_version: Option<Version>,
    pub allowed_range: Option<String>,
    pub require_monotonic_increase: bool,
    pub require_major_approval: bool,
    pub custom_rules: Vec<CustomRule>,
}

/// Outcome of validation (spec §4.H output).
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: String,
}

/// Match `allowed_range` (e.g. `3.x.x`, `2.1.x`) component-wise, `x`/`*`
/// acting as wildcards.
fn matches_allowed_range(version: &Version, range: &str) -> bool {
    let mut parts = range.split('.');
    let components = [version.major, version.minor, version.patch];
    for component in components {
        let Some(part) = parts.next() else {
            return true;
        };
        if part == "x" || part == "X" || part == "*" {
            continue;
        }
        match part.parse::<u32>() {
            Ok(n) if n == component => continue,
            _ => return false,
        }
    }
    true
}

/// Run all constraint checks against a candidate version (spec §4.H).
pub(crate) fn validate(
    candidate: &Version,
    previous: Option<&Version>,
    constraints: &Constraints,
    bump: BumpType,
    major_approved: bool,
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if constraints.blocked.contains(&candidate.to_string()) {
        errors.push(format!("version {candidate} is in the blocked list"));
    }

    if let Some(min) = &constraints.minimum_version {
        if candidate < min {
            errors.push(format!("version {candidate} is below minimum {min}"));
        }
    }

    if let Some(max) = &constraints.maximum_version {
        if candidate > max {
            errors.push(format!("version {candidate} is above maximum {max}"));
        }
    }

    if let Some(range) = &constraints.allowed_range {
        if !matches_allowed_range(candidate, range) {
            errors.push(format!(
                "version {candidate} does not match allowed range {range}"
            ));
        }
    }

    if constraints.require_monotonic_increase {
        if let Some(previous) = previous {
            if candidate <= previous {
                errors.push(format!(
                    "version {candidate} does not increase over previous {previous}"
                ));
            }
        }
    }

    if constraints.require_major_approval && bump == BumpType::Major && !major_approved {
        errors.push("major bump requires explicit approval".to_string());
    }

    for rule in &constraints.custom_rules {
        let violated = match &rule.kind {
            CustomRuleKind::Pattern(pattern) => !glob_like_matches(pattern, &candidate.to_string()),
            CustomRuleKind::Range(range) => !matches_allowed_range(candidate, range),
        };
        if violated {
            match rule.severity {
                Severity::Error => errors.push(rule.message.clone()),
                Severity::Warning => warnings.push(rule.message.clone()),
            }
        }
    }

    let is_valid = errors.is_empty();
    let summary = if is_valid {
        format!("{candidate} is valid")
    } else {
        format!("{candidate} failed {} check(s)", errors.len())
    };

    ValidationReport {
        is_valid,
        errors,
        warnings,
        summary,
    }
}

fn glob_like_matches(pattern: &str, value: &str) -> bool {
    glob::Pattern::new(pattern)
        .map(|p| p.matches(value))
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_version_is_rejected() {
        let constraints = Constraints {
            blocked: vec!["1.0.0".to_string()],
            ..Default::default()
        };
        let report = validate(&Version::new(1, 0, 0), None, &constraints, BumpType::Patch, false);
        assert!(!report.is_valid);
    }

    #[test]
    fn below_minimum_is_rejected() {
        let constraints = Constraints {
            minimum_version: Some(Version::new(2, 0, 0)),
            ..Default::default()
        };
        let report = validate(&Version::new(1, 0, 0), None, &constraints, BumpType::Patch, false);
        assert!(!report.is_valid);
    }

    #[test]
    fn allowed_range_wildcards_match() {
        assert!(matches_allowed_range(&Version::new(3, 5, 1), "3.x.x"));
        assert!(matches_allowed_range(&Version::new(2, 1, 9), "2.1.x"));
        assert!(!matches_allowed_range(&Version::new(2, 2, 9), "2.1.x"));
    }

    #[test]
    fn monotonic_increase_rejects_non_increasing_candidate() {
        let constraints = Constraints {
            require_monotonic_increase: true,
            ..Default::default()
        };
        let report = validate(
            &Version::new(1, 0, 0),
            Some(&Version::new(1, 0, 0)),
            &constraints,
            BumpType::None,
            false,
        );
        assert!(!report.is_valid);
    }

    #[test]
    fn major_bump_without_approval_is_rejected_when_required() {
        let constraints = Constraints {
            require_major_approval: true,
            ..Default::default()
        };
        let report = validate(&Version::new(2, 0, 0), None, &constraints, BumpType::Major, false);
        assert!(!report.is_valid);

        let report = validate(&Version::new(2, 0, 0), None, &constraints, BumpType::Major, true);
        assert!(report.is_valid);
    }

    #[test]
    fn custom_warning_does_not_invalidate() {
        let constraints = Constraints {
            custom_rules: vec![CustomRule {
                kind: CustomRuleKind::Range("1.x.x".to_string()),
                severity: Severity::Warning,
                message: "expected a 1.x release".to_string(),
            }],
            ..Default::default()
        };
        let report = validate(&Version::new(2, 0, 0), None, &constraints, BumpType::Major, false);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
    }
}
