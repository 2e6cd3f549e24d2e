//! Static repository registry.
//!
//! # Purpose
//! Supplies the repository and revision context the frame layer consumes.
//! Persistence is out of scope; deployments register repositories at
//! startup.
use quarry_frames::{RepoDescriptor, RevisionContext};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RepoEntry {
    pub repo: RepoDescriptor,
    pub rev: RevisionContext,
}

#[derive(Debug, Default)]
pub struct RepoRegistry {
    repos: HashMap<String, RepoEntry>,
}

impl RepoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, repo: RepoDescriptor, rev: RevisionContext) {
        self.repos
            .insert(repo.path.clone(), RepoEntry { repo, rev });
    }

    pub fn get(&self, path: &str) -> Option<&RepoEntry> {
        self.repos.get(path)
    }
}
