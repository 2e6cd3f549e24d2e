//! Quarry platform app embedding.
//!
//! # Purpose
//! Lets third-party "platform apps" render inside a repository page without
//! touching the host request or response directly. Apps register as
//! [`Frame`]s; the host resolves the enabled set per repository through the
//! [`FrameRegistry`] and dispatches page requests through the
//! [`FrameProxy`], which runs the app against a fully buffered in-memory
//! exchange and classifies the captured result.
//!
//! # Key invariants
//! - Only non-mirror git repositories may host frames.
//! - An app's response is fully buffered before any decision is made; apps
//!   never stream to the client connection.
//! - In verbatim mode only content-encoding, content-type, and location
//!   headers are relayed; everything else an app sets is discarded.
//! - The canonical app root URL has no trailing slash.

mod errors;
mod frame;
mod proxy;
mod registry;
mod repo;

pub use errors::{FrameError, FrameResult};
pub use frame::{EnablePredicate, Frame, FrameHandler, FRAME_TITLE_HEADER, VERBATIM_HEADER};
pub use proxy::{FrameOutcome, FrameProxy, FrameScope, RenderedFrame};
pub use registry::FrameRegistry;
pub use repo::{RepoDescriptor, RevisionContext, VcsKind};
