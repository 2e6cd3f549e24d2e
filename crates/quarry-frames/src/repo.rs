//! Repository and revision descriptors consumed by the frame layer.
//!
//! # Purpose
//! Minimal views of the data the host page layer has already resolved:
//! which repository a frame request targets and whether version-control
//! data is available for the requested revision.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Git,
    Hg,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    /// Canonical repository path, e.g. `quarry/quarry`.
    pub path: String,
    pub vcs: VcsKind,
    /// Mirrors have their canonical location on another server; apps are
    /// disallowed for them.
    pub mirror: bool,
}

impl RepoDescriptor {
    pub fn git(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            vcs: VcsKind::Git,
            mirror: false,
        }
    }
}

/// Revision context resolved by the host page layer before the frame layer
/// runs. No commit means the repository has no version-control data yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionContext {
    pub commit_id: Option<String>,
}

impl RevisionContext {
    pub fn at_commit(commit_id: impl Into<String>) -> Self {
        Self {
            commit_id: Some(commit_id.into()),
        }
    }

    pub fn has_vcs_data(&self) -> bool {
        self.commit_id.is_some()
    }
}
