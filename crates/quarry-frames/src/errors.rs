use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("not a valid app: {0}")]
    AppNotFound(String),
    #[error("frame id already registered: {0}")]
    DuplicateFrame(String),
    /// Should be unreachable given dispatch happens under the mount prefix.
    #[error("could not load app: {prefix:?} was not a prefix of {path:?}")]
    RoutingInvariant { prefix: String, path: String },
    #[error("app sub-request failed: {0}")]
    Subrequest(String),
}

pub type FrameResult<T> = Result<T, FrameError>;
