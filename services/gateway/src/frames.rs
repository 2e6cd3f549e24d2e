//! Host-side frame serving.
//!
//! # Purpose
//! Resolves the repository and app from the route, dispatches the request
//! through the frame proxy, and turns the classified outcome into the host
//! response: an embedding page, a redirect, a verbatim relay, or a trip
//! through login.
use crate::api::error::{api_not_found, ApiError};
use crate::app::AppState;
use axum::body::Body;
use axum::extract::{Extension, State};
use axum::http::header::LOCATION;
use axum::http::{Request, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use http::header::{CONTENT_ENCODING, CONTENT_TYPE};
use quarry_auth::RequestContext;
use quarry_frames::{FrameOutcome, RenderedFrame};

const REPOS_PREFIX: &str = "/repos/";
const APPS_SEPARATOR: &str = "/-/apps/";

/// Repo path, app id, and mount prefix parsed out of a frame route.
struct FrameRoute {
    repo_path: String,
    app_id: String,
    mount_prefix: String,
}

fn parse_frame_route(path: &str) -> Option<FrameRoute> {
    let rest = path.strip_prefix(REPOS_PREFIX)?;
    let separator = rest.find(APPS_SEPARATOR)?;
    let repo_path = &rest[..separator];
    let after = &rest[separator + APPS_SEPARATOR.len()..];
    let app_id = after.split('/').next().unwrap_or_default();
    if repo_path.is_empty() || app_id.is_empty() {
        return None;
    }
    Some(FrameRoute {
        repo_path: repo_path.to_string(),
        app_id: app_id.to_string(),
        mount_prefix: format!("{REPOS_PREFIX}{repo_path}{APPS_SEPARATOR}{app_id}"),
    })
}

pub async fn serve_frame(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    request: Request<Body>,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    let route = parse_frame_route(&path).ok_or_else(|| api_not_found("not a frame route"))?;
    let entry = state
        .repos
        .get(&route.repo_path)
        .cloned()
        .ok_or_else(|| api_not_found("no such repository"))?;

    let outcome = state
        .proxy
        .serve(
            &entry.repo,
            &entry.rev,
            ctx.actor().is_some(),
            &route.app_id,
            &route.mount_prefix,
            request,
        )
        .await?;

    let response = match outcome {
        FrameOutcome::Rendered(rendered) => render_frame_page(&route.repo_path, &rendered),
        FrameOutcome::NoVcsData => render_no_vcs_page(&route.repo_path),
        FrameOutcome::Redirect { location } => Response::builder()
            .status(StatusCode::MOVED_PERMANENTLY)
            .header(LOCATION, location)
            .body(Body::empty())
            .map_err(|err| crate::api::error::api_internal(&err.to_string()))?,
        FrameOutcome::Passthrough {
            status,
            content_encoding,
            content_type,
            location,
            body,
        } => {
            let mut builder = Response::builder().status(status);
            if let Some(value) = content_encoding {
                builder = builder.header(CONTENT_ENCODING, value);
            }
            if let Some(value) = content_type {
                builder = builder.header(CONTENT_TYPE, value);
            }
            if let Some(value) = location {
                builder = builder.header(LOCATION, value);
            }
            builder
                .body(Body::from(body))
                .map_err(|err| crate::api::error::api_internal(&err.to_string()))?
        }
        FrameOutcome::ReauthRequired => {
            // App said unauthorized and nobody is signed in: go through
            // login and retry the same page.
            let location = format!("{}?return-to={}", state.login_url, path);
            Response::builder()
                .status(StatusCode::FOUND)
                .header(LOCATION, location)
                .body(Body::empty())
                .map_err(|err| crate::api::error::api_internal(&err.to_string()))?
        }
    };
    Ok(response)
}

// Minimal host shell; the real page template engine is a separate layer.
fn render_frame_page(repo_path: &str, rendered: &RenderedFrame) -> Response {
    let subtitle = rendered
        .subtitle
        .as_deref()
        .map(|subtitle| format!(" — {}", escape_html(subtitle)))
        .unwrap_or_default();
    let content = match (&rendered.html, &rendered.error) {
        // Trusted markup from the app, embedded as-is.
        (Some(html), _) => html.clone(),
        (None, Some(error)) => format!(
            r#"<div class="frame-error">{}</div>"#,
            escape_html(error)
        ),
        (None, None) => String::new(),
    };
    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>{title}{subtitle} · {repo}</title></head>\n\
         <body><main class=\"frame\">{content}</main></body></html>\n",
        title = escape_html(&rendered.title),
        repo = escape_html(repo_path),
    ))
    .into_response()
}

fn render_no_vcs_page(repo_path: &str) -> Response {
    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>{repo}</title></head>\n\
         <body><main class=\"frame-empty\">No version-control data for this repository yet.</main></body></html>\n",
        repo = escape_html(repo_path),
    ))
    .into_response()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
