//! Version model (spec component A).
//!
//! Parses, compares and formats SemVer-shaped version values, plus the
//! coarser "prerelease class" ordering the tag resolver uses when ranking
//! candidate tags of otherwise-equal (major, minor, patch).

mod identifier;
mod prerelease;

pub(crate) use prerelease::PrereleaseClass;

use std::cmp::Ordering;
use std::fmt;

use crate::error::Error;
use prerelease::Prerelease;

/// An ordered (major, minor, patch, prerelease, build) version value.
///
/// Build metadata never participates in comparison or equality, per SemVer
/// 2.0 §10; only the canonical `major.minor.patch[-pre][+build]` form is
/// guaranteed to round-trip through [`Version::parse`] and [`Version::to_string`].
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub(crate) prerelease: Option<Prerelease>,
    pub(crate) build: Option<String>,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Version {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    pub fn with_prerelease(mut self, label: &str, number: u64) -> Version {
        self.prerelease = Some(Prerelease::with_label_and_number(label, number));
        self
    }

    /// Parse `M.N[.P][-pre][+build]`, stripping a leading `v`/`V` first.
    pub fn parse(raw: &str) -> Result<Version, Error> {
        let raw = raw.trim();
        let stripped = raw.strip_prefix(['v', 'V']).unwrap_or(raw);

        let (core_and_pre, build) = match stripped.split_once('+') {
            Some((a, b)) => (a, Some(b.to_string())),
            None => (stripped, None),
        };
        let (core, pre) = match core_and_pre.split_once('-') {
            Some((a, b)) => (a, Some(b)),
            None => (core_and_pre, None),
        };

        let mut parts = core.split('.');
        let major = parse_component(parts.next(), raw)?;
        let minor = parse_component(parts.next(), raw)?;
        let patch = parse_component(parts.next(), raw)?;
        if parts.next().is_some() {
            return Err(Error::ParseFailure(format!(
                "version {raw:?} has more than three numeric components"
            )));
        }

        Ok(Version {
            major,
            minor,
            patch,
            prerelease: pre.map(Prerelease::parse),
            build,
        })
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    pub(crate) fn prerelease_class(&self) -> PrereleaseClass {
        match &self.prerelease {
            Some(p) => p.class(),
            None => PrereleaseClass::None,
        }
    }

    pub(crate) fn prerelease_number(&self) -> Option<u64> {
        self.prerelease.as_ref().and_then(|p| p.number())
    }

    pub(crate) fn prerelease_label(&self) -> Option<String> {
        self.prerelease.as_ref().map(|p| p.label())
    }

    /// Return a version identical to `self` but with the prerelease counter
    /// advanced (spec §4.J main-branch prerelease progression rule).
    pub(crate) fn with_incremented_prerelease(&self) -> Version {
        let mut next = self.clone();
        if let Some(pre) = &self.prerelease {
            next.prerelease = Some(pre.increment());
        }
        next.build = None;
        next
    }
}

fn parse_component(part: Option<&str>, raw: &str) -> Result<u32, Error> {
    let part = part.ok_or_else(|| Error::ParseFailure(format!("version {raw:?} is incomplete")))?;
    part.parse::<u32>()
        .map_err(|_| Error::ParseFailure(format!("version {raw:?} has a non-numeric component")))
}

/// SemVer §11 precedence: major, minor, patch numerically, then
/// prerelease identifiers; a prerelease version has lower precedence than
/// the same core version without one.
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then(match (&self.prerelease, &other.prerelease) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare("1.2.3", 1, 2, 3)]
    #[case::prefixed("v1.2.3", 1, 2, 3)]
    #[case::upper_prefixed("V1.2.3", 1, 2, 3)]
    fn parses_core(#[case] raw: &str, #[case] major: u32, #[case] minor: u32, #[case] patch: u32) {
        let v = Version::parse(raw).unwrap();
        assert_eq!((v.major, v.minor, v.patch), (major, minor, patch));
    }

    #[test]
    fn parses_prerelease_and_build() {
        let v = Version::parse("1.0.0-alpha.1+build.123").unwrap();
        assert_eq!(v.prerelease_label().as_deref(), Some("alpha"));
        assert_eq!(v.prerelease_number(), Some(1));
        assert_eq!(v.build.as_deref(), Some("build.123"));
    }

    #[test]
    fn round_trips() {
        for raw in ["1.2.3", "1.0.0-alpha.1", "1.0.0-alpha.1+build.123", "0.1.0"] {
            let v = Version::parse(raw).unwrap();
            assert_eq!(v.to_string(), raw);
        }
    }

    #[test]
    fn rejects_malformed() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("a.b.c").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
    }

    #[test]
    fn build_metadata_ignored_in_ordering() {
        let a = Version::parse("1.0.0+build.1").unwrap();
        let b = Version::parse("1.0.0+build.2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn prerelease_ranks_below_release() {
        let pre = Version::parse("1.0.0-alpha.1").unwrap();
        let rel = Version::parse("1.0.0").unwrap();
        assert!(pre < rel);
    }

    #[test]
    fn full_semver_precedence_example() {
        // from https://semver.org/spec/v2.0.0.html#spec-item-11
        let ladder = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];
        let parsed: Vec<Version> = ladder.iter().map(|s| Version::parse(s).unwrap()).collect();
        for pair in parsed.windows(2) {
            assert!(pair[0] < pair[1], "{} should be < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn exactly_one_ordering_relation_holds() {
        let a = Version::parse("1.2.3-alpha.1").unwrap();
        let b = Version::parse("1.2.3-beta.1").unwrap();
        let relations = [a < b, a == b, a > b];
        assert_eq!(relations.iter().filter(|r| **r).count(), 1);
    }
}
