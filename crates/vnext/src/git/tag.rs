//! Raw tag enumeration primitives and tag-name validation (spec §4.B).
//!
//! Classifying a raw tag into a global or project-scoped [`crate::tags::VersionTag`]
//! candidate is the Tag Resolver's job (spec component C, `src/tags.rs`);
//! the git adapter only knows about labels and commits.

use git2::Delta;

/// A tag as read straight off the repository, before any scope
/// classification has been applied.
#[derive(Debug, Clone)]
pub(crate) struct RawTag {
    pub(crate) label: String,
    pub(crate) commit: Option<git2::Oid>,
}

/// Kinds a single diff delta can take (spec §4.B `diff_paths`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DiffKind {
    Added,
    Modified,
    Renamed,
    Deleted,
    Copied,
    TypeChanged,
}

impl From<Delta> for DiffKind {
    fn from(delta: Delta) -> DiffKind {
        match delta {
            Delta::Added => DiffKind::Added,
            Delta::Deleted => DiffKind::Deleted,
            Delta::Renamed => DiffKind::Renamed,
            Delta::Copied => DiffKind::Copied,
            Delta::Typechange => DiffKind::TypeChanged,
            _ => DiffKind::Modified,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DiffEntry {
    pub(crate) path: String,
    pub(crate) kind: DiffKind,
    pub(crate) is_submodule: bool,
}

/// Outcome of attempting to create a tag (spec §4.B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateTagOutcome {
    Created,
    AlreadyExists,
    InvalidName,
}

/// Reject names containing `..`, `@{`, `\`, trailing `.`, trailing
/// `.lock`, or trailing whitespace (spec §4.B "Tag-name validation").
pub(crate) fn is_valid_tag_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.contains("..") || name.contains("@{") || name.contains('\\') {
        return false;
    }
    if name.ends_with('.') || name.ends_with(".lock") || name.ends_with(' ') || name.ends_with('\t')
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("v1.2.3", true)]
    #[case::double_dot("v1..2.3", false)]
    #[case::at_brace("v1@{2", false)]
    #[case::backslash("v1\\2", false)]
    #[case::trailing_dot("v1.2.3.", false)]
    #[case::trailing_lock("v1.2.3.lock", false)]
    #[case::trailing_space("v1.2.3 ", false)]
    fn validates_tag_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_tag_name(name), expected);
    }
}
