//! Dotted identifiers used inside a prerelease string.
//!
//! Each identifier is either purely numeric (compared as an integer) or
//! alphanumeric (compared lexicographically); SemVer 2.0 §11 ranks numeric
//! identifiers below alphanumeric ones when the two are compared directly.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl Identifier {
    pub(crate) fn parse(raw: &str) -> Identifier {
        let looks_numeric = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && !(raw.len() > 1 && raw.starts_with('0'));
        if looks_numeric {
            if let Ok(n) = raw.parse::<u64>() {
                return Identifier::Numeric(n);
            }
        }
        Identifier::AlphaNumeric(raw.to_string())
    }

    pub(crate) fn as_numeric(&self) -> Option<u64> {
        match self {
            Identifier::Numeric(n) => Some(*n),
            Identifier::AlphaNumeric(_) => None,
        }
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        use Identifier::*;
        match (self, other) {
            (Numeric(a), Numeric(b)) => a.cmp(b),
            (AlphaNumeric(a), AlphaNumeric(b)) => a.cmp(b),
            (Numeric(_), AlphaNumeric(_)) => Ordering::Less,
            (AlphaNumeric(_), Numeric(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{n}"),
            Identifier::AlphaNumeric(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::numeric("12", Identifier::Numeric(12))]
    #[case::alpha("alpha", Identifier::AlphaNumeric("alpha".into()))]
    #[case::leading_zero_not_numeric("01", Identifier::AlphaNumeric("01".into()))]
    fn parses(#[case] raw: &str, #[case] expected: Identifier) {
        assert_eq!(Identifier::parse(raw), expected);
    }

    #[test]
    fn numeric_ranks_below_alphanumeric() {
        assert!(Identifier::Numeric(9999) < Identifier::AlphaNumeric("a".into()));
    }
}
