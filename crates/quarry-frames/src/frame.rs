//! Platform app ("frame") model.
use crate::repo::RepoDescriptor;
use axum::body::Body;
use axum::response::Response;
use http::Request;
use std::convert::Infallible;
use std::sync::Arc;
use tower::util::BoxCloneSyncService;
use tower::Service;

/// Response header a frame sets to `true` to have its response relayed
/// byte-for-byte instead of embedded in the host page.
pub const VERBATIM_HEADER: &str = "x-quarry-verbatim";

/// Response header carrying the frame's display subtitle.
pub const FRAME_TITLE_HEADER: &str = "x-quarry-frame-title";

/// Per-frame gate deciding whether the app is enabled for a repository.
pub trait EnablePredicate: Send + Sync {
    fn enabled(&self, repo: &RepoDescriptor) -> bool;
}

impl<F> EnablePredicate for F
where
    F: Fn(&RepoDescriptor) -> bool + Send + Sync,
{
    fn enabled(&self, repo: &RepoDescriptor) -> bool {
        self(repo)
    }
}

/// Boxed request handler for a frame. Any tower service over HTTP requests
/// fits, including an `axum::Router`.
pub type FrameHandler = BoxCloneSyncService<Request<Body>, Response, Infallible>;

/// A registered platform app embeddable inside a repository page.
#[derive(Clone)]
pub struct Frame {
    pub id: String,
    pub title: String,
    /// Absent predicate means enabled for every eligible repository.
    pub enable: Option<Arc<dyn EnablePredicate>>,
    pub handler: FrameHandler,
}

impl Frame {
    pub fn new<S>(id: impl Into<String>, title: impl Into<String>, handler: S) -> Self
    where
        S: Service<Request<Body>, Response = Response, Error = Infallible>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        Self {
            id: id.into(),
            title: title.into(),
            enable: None,
            handler: BoxCloneSyncService::new(handler),
        }
    }

    pub fn with_enable(mut self, enable: impl EnablePredicate + 'static) -> Self {
        self.enable = Some(Arc::new(enable));
        self
    }

    pub fn enabled_for(&self, repo: &RepoDescriptor) -> bool {
        self.enable
            .as_ref()
            .map_or(true, |predicate| predicate.enabled(repo))
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("enable", &self.enable.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::VcsKind;
    use axum::routing::get;
    use axum::Router;

    fn test_frame(id: &str) -> Frame {
        Frame::new(id, "Test", Router::new().route("/", get(|| async { "ok" })))
    }

    #[test]
    fn absent_predicate_enables_everywhere() {
        let frame = test_frame("tracker");
        assert!(frame.enabled_for(&RepoDescriptor::git("a/b")));
    }

    #[test]
    fn predicate_gates_by_repo() {
        let frame = test_frame("tracker")
            .with_enable(|repo: &RepoDescriptor| repo.path.starts_with("quarry/"));
        assert!(frame.enabled_for(&RepoDescriptor::git("quarry/quarry")));
        assert!(!frame.enabled_for(&RepoDescriptor::git("other/repo")));
    }

    #[test]
    fn predicate_sees_full_descriptor() {
        let frame = test_frame("tracker")
            .with_enable(|repo: &RepoDescriptor| repo.vcs == VcsKind::Git && !repo.mirror);
        let mut repo = RepoDescriptor::git("a/b");
        assert!(frame.enabled_for(&repo));
        repo.mirror = true;
        assert!(!frame.enabled_for(&repo));
    }
}
