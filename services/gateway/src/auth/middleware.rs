//! Per-request identity resolution middleware.
//!
//! # Purpose
//! Runs the identity resolver before every handler, turning inbound
//! `authorization` metadata into a [`RequestContext`] stored in request
//! extensions. Lack of credentials is not an error; a failed authentication
//! attempt is.
use crate::api::error::ApiError;
use crate::app::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::HeaderMap;
use quarry_auth::{Metadata, RequestContext};

pub fn metadata_from_headers(headers: &HeaderMap) -> Metadata {
    let mut metadata = Metadata::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            metadata.insert(name.as_str(), value);
        }
    }
    metadata
}

pub async fn resolve_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let metadata = metadata_from_headers(request.headers());
    let ctx = state
        .resolver
        .resolve(RequestContext::new(), &metadata)
        .await?;
    if let Some(actor) = ctx.actor() {
        tracing::debug!(uid = actor.uid, client_id = %actor.client_id, "resolved actor");
    }
    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}
