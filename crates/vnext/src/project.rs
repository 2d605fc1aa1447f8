//! Caller-supplied project identity (spec §3 `ProjectIdentity`).
//!
//! The engine never reads project files to discover this information; the
//! host that drives `resolve()` already knows its own workspace layout and
//! passes it in.

use std::path::PathBuf;

/// Identity of the project being resolved, as supplied by the caller.
#[derive(Debug, Clone)]
pub struct ProjectIdentity {
    pub name: String,
    pub path: PathBuf,
    pub is_test: bool,
    pub is_packable: bool,
    /// Repo-relative paths of this project's direct dependencies, already
    /// resolved by the caller (the engine performs no dependency-graph walk
    /// of its own; see spec §9 "Cyclic graphs").
    pub dependency_paths: Vec<PathBuf>,
}

impl ProjectIdentity {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> ProjectIdentity {
        ProjectIdentity {
            name: name.into(),
            path: path.into(),
            is_test: false,
            is_packable: true,
            dependency_paths: Vec::new(),
        }
    }

    pub fn with_test(mut self, is_test: bool) -> ProjectIdentity {
        self.is_test = is_test;
        self
    }

    pub fn with_packable(mut self, is_packable: bool) -> ProjectIdentity {
        self.is_packable = is_packable;
        self
    }

    pub fn with_dependency_paths(mut self, paths: Vec<PathBuf>) -> ProjectIdentity {
        self.dependency_paths = paths;
        self
    }
}
