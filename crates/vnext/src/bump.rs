//! The shared bump-type lattice used across the file pattern matcher,
//! commit classifier, change detector, and resolver.

use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;

/// One of `{None, Patch, Minor, Major}`, totally ordered by that chain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum BumpType {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpType {
    pub fn max(self, other: BumpType) -> BumpType {
        std::cmp::max(self, other)
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BumpType::None => "none",
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        };
        write!(f, "{s}")
    }
}
