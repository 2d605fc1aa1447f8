//! Prerelease identifier sequence and the coarser "prerelease class" used by
//! the tag resolver when ranking candidates of equal (major, minor, patch).

use std::cmp::Ordering;
use std::fmt;

use super::identifier::Identifier;

/// A `.`-separated sequence of prerelease identifiers, e.g. `alpha.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Prerelease {
    identifiers: Vec<Identifier>,
}

impl Prerelease {
    pub(crate) fn parse(raw: &str) -> Prerelease {
        let identifiers = raw.split('.').map(Identifier::parse).collect();
        Prerelease { identifiers }
    }

    /// The class used for tag-selection ordering: alpha < beta < rc <
    /// no-prerelease, with any other label ranking below alpha.
    pub(crate) fn class(&self) -> PrereleaseClass {
        match self.label().to_ascii_lowercase().as_str() {
            "alpha" => PrereleaseClass::Alpha,
            "beta" => PrereleaseClass::Beta,
            "rc" => PrereleaseClass::Rc,
            _ => PrereleaseClass::Unknown,
        }
    }

    /// The first (leading) identifier, conventionally the label (`alpha`,
    /// `beta`, `rc`, or a custom string).
    pub(crate) fn label(&self) -> String {
        self.identifiers
            .first()
            .map(|i| i.to_string())
            .unwrap_or_default()
    }

    /// The last numeric identifier, if any — the `.N` counter used for
    /// prerelease progression (`alpha.1` -> `alpha.2`).
    pub(crate) fn number(&self) -> Option<u64> {
        self.identifiers.iter().rev().find_map(|i| i.as_numeric())
    }

    /// Produce a new prerelease with the trailing numeric identifier
    /// incremented by one (appending `.1` if there is none yet).
    pub(crate) fn increment(&self) -> Prerelease {
        let mut identifiers = self.identifiers.clone();
        match identifiers.last() {
            Some(Identifier::Numeric(n)) => {
                let n = *n;
                *identifiers.last_mut().unwrap() = Identifier::Numeric(n + 1);
            }
            _ => identifiers.push(Identifier::Numeric(1)),
        }
        Prerelease { identifiers }
    }

    pub(crate) fn with_label_and_number(label: &str, number: u64) -> Prerelease {
        Prerelease {
            identifiers: vec![Identifier::parse(label), Identifier::Numeric(number)],
        }
    }
}

impl Ord for Prerelease {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifiers
            .iter()
            .zip(other.identifiers.iter())
            .map(|(a, b)| a.cmp(b))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| self.identifiers.len().cmp(&other.identifiers.len()))
    }
}

impl PartialOrd for Prerelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Prerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.identifiers.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// The lexical family a prerelease label belongs to, for tag-selection
/// ordering only (see spec §4.C); unrelated to full SemVer precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum PrereleaseClass {
    Unknown,
    Alpha,
    Beta,
    Rc,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::alpha("alpha.1", PrereleaseClass::Alpha)]
    #[case::beta("beta.2", PrereleaseClass::Beta)]
    #[case::rc("rc.1", PrereleaseClass::Rc)]
    #[case::custom("snapshot.1", PrereleaseClass::Unknown)]
    fn classifies(#[case] raw: &str, #[case] expected: PrereleaseClass) {
        assert_eq!(Prerelease::parse(raw).class(), expected);
    }

    #[test]
    fn class_orders_alpha_beta_rc() {
        assert!(PrereleaseClass::Unknown < PrereleaseClass::Alpha);
        assert!(PrereleaseClass::Alpha < PrereleaseClass::Beta);
        assert!(PrereleaseClass::Beta < PrereleaseClass::Rc);
        assert!(PrereleaseClass::Rc < PrereleaseClass::None);
    }

    #[test]
    fn increment_bumps_trailing_counter() {
        let p = Prerelease::parse("alpha.1");
        assert_eq!(p.increment().to_string(), "alpha.2");
    }

    #[test]
    fn increment_appends_counter_when_absent() {
        let p = Prerelease::parse("alpha");
        assert_eq!(p.increment().to_string(), "alpha.1");
    }

    #[test]
    fn shorter_identifier_list_ranks_lower_when_prefix_equal() {
        let a = Prerelease::parse("alpha");
        let b = Prerelease::parse("alpha.1");
        assert!(a < b);
    }

    #[test]
    fn numeric_identifiers_compare_numerically() {
        let a = Prerelease::parse("alpha.9");
        let b = Prerelease::parse("alpha.10");
        assert!(a < b);
    }
}
