mod common;

use axum::http::StatusCode;
use common::{authed_request, get_request, mint_token, read_body, test_state};
use gateway::app::build_router;
use tower::ServiceExt;

#[tokio::test]
async fn frame_root_renders_app_markup_and_subtitle() {
    let app = build_router(test_state());
    let response = app
        .oneshot(get_request("/repos/quarry/quarry/-/apps/tracker"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("<ul>tracker home</ul>"));
    assert!(body.contains("Open issues"));
    assert!(body.contains("Tracker"));
}

#[tokio::test]
async fn frame_root_with_trailing_slash_redirects_permanently() {
    let app = build_router(test_state());
    let response = app
        .oneshot(get_request("/repos/quarry/quarry/-/apps/tracker/?page=2"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    let location = response
        .headers()
        .get("location")
        .expect("location")
        .to_str()
        .expect("utf8");
    assert_eq!(location, "/repos/quarry/quarry/-/apps/tracker?page=2");
}

#[tokio::test]
async fn unknown_app_is_a_not_found_page_error() {
    let app = build_router(test_state());
    let response = app
        .oneshot(get_request("/repos/quarry/quarry/-/apps/wiki"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_repo_is_not_found() {
    let app = build_router(test_state());
    let response = app
        .oneshot(get_request("/repos/nobody/home/-/apps/tracker"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn repo_without_vcs_data_renders_fallback_without_invoking_app() {
    let app = build_router(test_state());
    let response = app
        .oneshot(get_request("/repos/quarry/empty/-/apps/tracker"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("No version-control data"));
}

#[tokio::test]
async fn unauthorized_app_response_without_actor_redirects_to_login() {
    let app = build_router(test_state());
    let response = app
        .oneshot(get_request("/repos/quarry/quarry/-/apps/tracker/secure"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response
        .headers()
        .get("location")
        .expect("location")
        .to_str()
        .expect("utf8");
    assert!(location.starts_with("/login?return-to="));
    assert!(location.contains("/repos/quarry/quarry/-/apps/tracker/secure"));
}

#[tokio::test]
async fn unauthorized_app_response_with_actor_renders_inline_error() {
    let app = build_router(test_state());
    let token = mint_token(&common::alice());
    let response = app
        .oneshot(authed_request(
            "/repos/quarry/quarry/-/apps/tracker/secure",
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("sign in required"));
    assert!(body.contains("frame-error"));
}

#[tokio::test]
async fn failing_app_renders_inline_error_not_a_host_failure() {
    let app = build_router(test_state());
    let response = app
        .oneshot(get_request("/repos/quarry/quarry/-/apps/tracker/boom"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_body(response).await;
    assert!(body.contains("tracker exploded"));
}

#[tokio::test]
async fn verbatim_app_response_is_relayed_directly() {
    let app = build_router(test_state());
    let response = app
        .oneshot(get_request("/repos/quarry/quarry/-/apps/tracker/download"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response
        .headers()
        .get("location")
        .expect("location")
        .to_str()
        .expect("utf8");
    assert_eq!(location, "/foo");
    let body = read_body(response).await;
    assert!(!body.contains("<html"));
}
