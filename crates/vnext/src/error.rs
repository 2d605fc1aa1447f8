//! Error types for vnext.

use proc_exit::{Code, Exit};
use thiserror::Error;

const EXIT_REPOSITORY_UNAVAILABLE: i32 = 10;
const EXIT_CONFIGURATION_INVALID: i32 = 11;
const EXIT_PARSE_FAILURE: i32 = 12;

/// The error type for the version resolution engine.
///
/// Per the engine's propagation policy, these variants are reserved for the
/// genuinely fatal kinds: an unusable repository, a configuration the
/// engine cannot proceed with at all, or a malformed request. Per-tag,
/// per-commit, and validation-level problems are folded into the
/// [`crate::VersionResult`] and its validation report instead of raised
/// here, so the engine never fails a build because git (or one tag) was
/// awkward.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// The repository could not be opened or used at all.
    #[error("repository unavailable: {0}")]
    RepositoryUnavailable(String),
    /// The supplied configuration is invalid and the engine has no safe
    /// default to fall back on.
    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(String),
    /// A version, tag name, or glob pattern in the *request itself* (as
    /// opposed to a single tag found in the repository) failed to parse.
    #[error("parse failure: {0}")]
    ParseFailure(String),
    /// A git operation that the engine could not treat conservatively
    /// failed outright (see [`Error::GitOperationFailed`] doc note).
    #[error(transparent)]
    GitOperationFailed(#[from] git2::Error),
}

/// See spec §6 "Exit semantics at the CLI boundary": 0 on success (valid
/// or invalid per the validator, distinguished in the report), non-zero
/// only on I/O or configuration errors.
impl From<Error> for Exit {
    fn from(err: Error) -> Self {
        match err {
            Error::RepositoryUnavailable(_) => {
                Exit::new(Code::new(EXIT_REPOSITORY_UNAVAILABLE)).with_message(err.to_string())
            }
            Error::ConfigurationInvalid(_) => {
                Exit::new(Code::new(EXIT_CONFIGURATION_INVALID)).with_message(err.to_string())
            }
            Error::ParseFailure(_) => {
                Exit::new(Code::new(EXIT_PARSE_FAILURE)).with_message(err.to_string())
            }
            Error::GitOperationFailed(_) => {
                Exit::new(Code::new(EXIT_REPOSITORY_UNAVAILABLE)).with_message(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(EXIT_REPOSITORY_UNAVAILABLE, EXIT_CONFIGURATION_INVALID);
        assert_ne!(EXIT_CONFIGURATION_INVALID, EXIT_PARSE_FAILURE);
    }
}
