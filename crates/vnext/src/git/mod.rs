//! Git adapter (spec component B).
//!
//! A thin, fallible wrapper around `git2` exposing exactly the primitives
//! the rest of the engine needs: branch classification, tag enumeration,
//! tree diffing, commit-height, reachability, and tag creation. Every
//! repository handle is scoped to a single resolution (spec §5, §9 "Scoped
//! resources") and released when the adapter is dropped.

mod branch;
mod tag;

pub(crate) use branch::BranchType;
pub use tag::CreateTagOutcome;
pub(crate) use tag::{DiffEntry, DiffKind, RawTag};

use std::path::Path;

use git2::{Repository, Sort};
use log::{debug, warn};

use crate::error::Error;

/// Owns a single `git2::Repository` handle for the duration of one
/// resolution.
pub(crate) struct GitAdapter {
    repo: Repository,
}

impl GitAdapter {
    pub(crate) fn open(repo_root: &Path) -> Result<GitAdapter, Error> {
        let repo = Repository::open(repo_root)
            .map_err(|e| Error::RepositoryUnavailable(e.to_string()))?;
        Ok(GitAdapter { repo })
    }

    /// The current branch name, or `None` when HEAD is detached.
    pub(crate) fn current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if !head.is_branch() {
            return None;
        }
        head.shorthand().map(str::to_string)
    }

    pub(crate) fn branch_type(&self, name: &str) -> BranchType {
        BranchType::classify(name)
    }

    /// Enumerate every tag in the repository, peeling annotated tags to
    /// their target commit. Scope classification (global vs. project) is
    /// the Tag Resolver's job (spec component C).
    pub(crate) fn tags(&self) -> Result<Vec<RawTag>, Error> {
        let mut out = Vec::new();
        let tag_names = self.repo.tag_names(None)?;
        for name in tag_names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{name}")) {
                Ok(r) => r,
                Err(e) => {
                    warn!("could not read tag reference {name}: {e}");
                    continue;
                }
            };
            let commit = match reference.peel_to_commit() {
                Ok(c) => Some(c.id()),
                Err(e) => {
                    debug!("tag {name} does not peel to a commit: {e}");
                    None
                }
            };
            out.push(RawTag {
                label: name.to_string(),
                commit,
            });
        }
        Ok(out)
    }

    /// Number of commits reachable from `to` (default HEAD) but not from
    /// `from`; 0 when they're equal.
    pub(crate) fn commit_height(
        &self,
        from: Option<git2::Oid>,
        to: Option<git2::Oid>,
    ) -> Result<u32, Error> {
        let to = match to {
            Some(oid) => oid,
            None => self.repo.head()?.peel_to_commit()?.id(),
        };
        let Some(from) = from else {
            // No base commit at all: every commit reachable from `to` counts.
            let mut revwalk = self.repo.revwalk()?;
            revwalk.set_sorting(Sort::NONE)?;
            revwalk.push(to)?;
            return Ok(revwalk.count() as u32);
        };
        if from == to {
            return Ok(0);
        }
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::NONE)?;
        revwalk.push(to)?;
        revwalk.hide(from)?;
        Ok(revwalk.count() as u32)
    }

    /// Diff `from_tree` (or an empty tree when `None`) against `to` (HEAD
    /// when `None`).
    pub(crate) fn diff_paths(
        &self,
        from_commit: Option<git2::Oid>,
        to_commit: Option<git2::Oid>,
    ) -> Result<Vec<DiffEntry>, Error> {
        let to = match to_commit {
            Some(oid) => self.repo.find_commit(oid)?,
            None => self.repo.head()?.peel_to_commit()?,
        };
        let to_tree = to.tree()?;
        let from_tree = match from_commit {
            Some(oid) => Some(self.repo.find_commit(oid)?.tree()?),
            None => None,
        };
        let diff = self
            .repo
            .diff_tree_to_tree(from_tree.as_ref(), Some(&to_tree), None)?;
        let mut out = Vec::new();
        for delta in diff.deltas() {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            let kind = DiffKind::from(delta.status());
            let is_submodule = delta.new_file().mode() == git2::FileMode::Commit;
            out.push(DiffEntry {
                path,
                kind,
                is_submodule,
            });
        }
        Ok(out)
    }

    pub(crate) fn is_reachable(&self, commit: git2::Oid, from: Option<git2::Oid>) -> bool {
        let Ok(head) = (match from {
            Some(oid) => Ok(oid),
            None => self.repo.head().and_then(|h| h.peel_to_commit()).map(|c| c.id()),
        }) else {
            return false;
        };
        self.repo
            .graph_descendant_of(head, commit)
            .unwrap_or(commit == head)
    }

    pub(crate) fn is_shallow(&self) -> bool {
        self.repo.is_shallow()
    }

    pub(crate) fn head_sha(&self) -> Result<String, Error> {
        Ok(self.repo.head()?.peel_to_commit()?.id().to_string())
    }

    pub(crate) fn head_short_sha(&self) -> Result<String, Error> {
        let full = self.head_sha()?;
        Ok(full.chars().take(8).collect())
    }

    pub(crate) fn head_commit_message(&self) -> Result<String, Error> {
        Ok(self
            .repo
            .head()?
            .peel_to_commit()?
            .summary()
            .unwrap_or_default()
            .to_string())
    }

    pub(crate) fn head_commit_date(&self) -> Result<i64, Error> {
        Ok(self.repo.head()?.peel_to_commit()?.time().seconds())
    }

    /// Collect commit summaries (+ bodies) reachable from HEAD but not from
    /// `base`, oldest-message-classification concerns left to the caller.
    pub(crate) fn commit_messages_since(
        &self,
        base: Option<git2::Oid>,
    ) -> Result<Vec<String>, Error> {
        let head = self.repo.head()?.peel_to_commit()?.id();
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::NONE)?;
        revwalk.push(head)?;
        if let Some(base) = base {
            if base != head {
                revwalk.hide(base)?;
            } else {
                return Ok(Vec::new());
            }
        }
        let mut out = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            if commit.parent_count() > 1 {
                continue; // merge commits carry no classification of their own
            }
            let summary = commit.summary().unwrap_or_default();
            let body = commit.body().unwrap_or_default();
            out.push(format!("{summary}\n{body}"));
        }
        Ok(out)
    }

    pub(crate) fn create_tag(
        &self,
        name: &str,
        message: Option<&str>,
        commit: Option<git2::Oid>,
        dry_run: bool,
    ) -> Result<CreateTagOutcome, Error> {
        if !tag::is_valid_tag_name(name) {
            return Ok(CreateTagOutcome::InvalidName);
        }
        if self
            .repo
            .find_reference(&format!("refs/tags/{name}"))
            .is_ok()
        {
            return Ok(CreateTagOutcome::AlreadyExists);
        }
        if dry_run {
            return Ok(CreateTagOutcome::Created);
        }
        let target = match commit {
            Some(oid) => self.repo.find_commit(oid)?,
            None => self.repo.head()?.peel_to_commit()?,
        };
        let signature = self.repo.signature().or_else(|_| {
            git2::Signature::now("vnext", "vnext@localhost")
        })?;
        match message {
            Some(message) => {
                self.repo
                    .tag(name, target.as_object(), &signature, message, false)?;
            }
            None => {
                self.repo.reference(
                    &format!("refs/tags/{name}"),
                    target.id(),
                    false,
                    "vnext: create lightweight tag",
                )?;
            }
        }
        Ok(CreateTagOutcome::Created)
    }
}
