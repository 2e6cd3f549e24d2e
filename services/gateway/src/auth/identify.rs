//! Federation identify endpoint.
//!
//! # Purpose
//! Answers "who is this caller" for downstream deployments that could not
//! verify a token locally. The identity middleware has already resolved the
//! context from the forwarded metadata; this handler just reports it.
use crate::api::types::IdentifyResponse;
use axum::extract::Extension;
use axum::Json;
use quarry_auth::{Actor, RequestContext};

pub async fn identify(Extension(ctx): Extension<RequestContext>) -> Json<IdentifyResponse> {
    let actor = ctx.actor().cloned().unwrap_or_else(Actor::anonymous);
    Json(IdentifyResponse {
        uid: actor.uid,
        login: actor.login,
        domain: actor.domain,
        client_id: actor.client_id,
    })
}
