//! Frame registration and per-repository enablement.
use crate::errors::{FrameError, FrameResult};
use crate::frame::Frame;
use crate::repo::{RepoDescriptor, VcsKind};
use std::collections::HashMap;

/// Static registry of platform apps, consulted per repository.
///
/// Registration order is display order, except `tracker` and `changes` are
/// forced to the first two positions.
#[derive(Default)]
pub struct FrameRegistry {
    frames: Vec<Frame>,
    apps_disabled: bool,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Globally disable platform apps for this deployment.
    pub fn with_apps_disabled(mut self, disabled: bool) -> Self {
        self.apps_disabled = disabled;
        self
    }

    pub fn register(&mut self, frame: Frame) -> FrameResult<()> {
        if self.frames.iter().any(|existing| existing.id == frame.id) {
            return Err(FrameError::DuplicateFrame(frame.id));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Apps enabled for the given repo, keyed by app ID, plus the order in
    /// which they should be displayed.
    ///
    /// Empty when apps are disabled globally, the repo is a mirror, or its
    /// version-control kind is unsupported.
    pub fn frames_for(&self, repo: &RepoDescriptor) -> (HashMap<String, Frame>, Vec<String>) {
        if self.apps_disabled {
            return (HashMap::new(), Vec::new());
        }
        // Mirrors have their canonical copy elsewhere; disallow all apps.
        if repo.mirror {
            return (HashMap::new(), Vec::new());
        }
        // Non-git apps are not currently supported.
        if repo.vcs != VcsKind::Git {
            return (HashMap::new(), Vec::new());
        }

        let mut frames = HashMap::new();
        let mut ordered_ids = Vec::new();
        for frame in &self.frames {
            if frame.enabled_for(repo) {
                ordered_ids.push(frame.id.clone());
                frames.insert(frame.id.clone(), frame.clone());
            }
        }

        // Pin tracker first and changes second; a stable swap, not a sort.
        for i in 0..ordered_ids.len() {
            match ordered_ids[i].as_str() {
                "tracker" => ordered_ids.swap(0, i),
                "changes" if ordered_ids.len() > 1 => ordered_ids.swap(1, i),
                _ => {}
            }
        }

        (frames, ordered_ids)
    }
}
