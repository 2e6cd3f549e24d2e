#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::routing::get;
use axum::Router;
use gateway::app::AppState;
use gateway::repos::RepoRegistry;
use quarry_auth::{
    Actor, AccessTokenIssuer, IdentityResolver, NoFederation, StaticKeyRegistry, TokenVerifier,
    TrustKey, TrustStore,
};
use quarry_frames::{
    Frame, FrameProxy, FrameRegistry, RepoDescriptor, RevisionContext, FRAME_TITLE_HEADER,
    VERBATIM_HEADER,
};
use std::sync::Arc;
use std::time::Duration;

pub const LOCAL_PRIVATE_KEY: &str = include_str!("../../testdata/local-key.pem");
pub const LOCAL_PUBLIC_KEY: &str = include_str!("../../testdata/local-key.pub.pem");
pub const EXTERNAL_PRIVATE_KEY: &str = include_str!("../../testdata/external-key.pem");

pub fn mint_token(actor: &Actor) -> String {
    AccessTokenIssuer::from_rsa_pem(
        "self-key",
        LOCAL_PRIVATE_KEY.as_bytes(),
        Duration::from_secs(600),
    )
    .expect("issuer")
    .issue(actor)
    .expect("issue")
}

pub fn alice() -> Actor {
    Actor {
        uid: 7,
        login: "alice".to_string(),
        domain: "quarry.example.com".to_string(),
        client_id: "self-key".to_string(),
        scope: vec!["repo:read".to_string()],
    }
}

fn tracker_app() -> Router {
    Router::new()
        .route(
            "/",
            get(|| async { ([(FRAME_TITLE_HEADER, "Open issues")], "<ul>tracker home</ul>") }),
        )
        .route(
            "/secure",
            get(|| async { (StatusCode::UNAUTHORIZED, "sign in required") }),
        )
        .route(
            "/boom",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "tracker exploded") }),
        )
        .route(
            "/download",
            get(|| async {
                (
                    StatusCode::FOUND,
                    [(VERBATIM_HEADER, "true"), ("location", "/foo")],
                    "",
                )
            }),
        )
}

pub fn test_state() -> AppState {
    let trust = Arc::new(TrustStore::new(
        TrustKey::from_rsa_pem("self-key", LOCAL_PUBLIC_KEY.as_bytes()).expect("self key"),
        None,
    ));
    let verifier = Arc::new(TokenVerifier::new(
        trust,
        Arc::new(StaticKeyRegistry::new()),
        5,
    ));
    let resolver = Arc::new(IdentityResolver::new(
        verifier,
        Arc::new(NoFederation),
        false,
    ));

    let mut registry = FrameRegistry::new();
    registry
        .register(Frame::new("tracker", "Tracker", tracker_app()))
        .expect("register tracker");

    let mut repos = RepoRegistry::new();
    repos.insert(
        RepoDescriptor::git("quarry/quarry"),
        RevisionContext::at_commit("abc123"),
    );
    repos.insert(RepoDescriptor::git("quarry/empty"), RevisionContext::default());

    AppState {
        resolver,
        proxy: Arc::new(FrameProxy::new(Arc::new(registry))),
        repos: Arc::new(repos),
        login_url: "/login".to_string(),
    }
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn authed_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

pub async fn read_body(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
