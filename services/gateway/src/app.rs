//! Gateway HTTP application wiring.
//!
//! # Purpose
//! Builds the axum router, configures middleware, and defines the shared
//! application state injected into handlers.
use crate::auth;
use crate::frames;
use crate::repos::RepoRegistry;
use axum::routing::{any, get};
use axum::{middleware, Router};
use quarry_auth::IdentityResolver;
use quarry_frames::FrameProxy;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<IdentityResolver>,
    pub proxy: Arc<FrameProxy>,
    pub repos: Arc<RepoRegistry>,
    pub login_url: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/auth/identify", get(auth::identify::identify))
        .route("/repos/*path", any(frames::serve_frame))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::resolve_identity,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
