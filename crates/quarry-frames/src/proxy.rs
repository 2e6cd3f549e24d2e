//! Isolated sub-request execution for platform apps.
//!
//! # Purpose
//! Runs an app handler against a fully buffered in-memory exchange and
//! classifies the captured response. The app never touches the real client
//! connection: status, headers, and body are materialized first, then the
//! host decides whether to embed, redirect, relay, or re-authenticate.
use crate::errors::{FrameError, FrameResult};
use crate::frame::{FRAME_TITLE_HEADER, VERBATIM_HEADER};
use crate::registry::FrameRegistry;
use crate::repo::{RepoDescriptor, RevisionContext};
use axum::body::{Body, Bytes};
use http::header::{CONTENT_ENCODING, CONTENT_TYPE, LOCATION};
use http::{HeaderValue, Request, StatusCode, Uri};
use std::sync::Arc;
use tower::ServiceExt;

/// Upper bound on a buffered app response. Apps produce page fragments;
/// anything larger is a misbehaving app, not a legitimate render.
const MAX_FRAME_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// Request-scoped frame context attached to the sub-request's extensions.
///
/// Owned by the sub-request and dropped with it on every exit path, so the
/// per-request store cannot outlive the proxy invocation.
#[derive(Debug, Clone)]
pub struct FrameScope {
    pub mount_prefix: String,
    pub repo_path: String,
}

/// A frame response destined for the host page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    pub title: String,
    pub subtitle: Option<String>,
    /// Trusted markup produced by the app on a 200.
    pub html: Option<String>,
    /// Inline error text for non-200 app responses; the page still renders.
    pub error: Option<String>,
}

/// Terminal state of one proxy invocation.
#[derive(Debug)]
pub enum FrameOutcome {
    Rendered(RenderedFrame),
    /// Permanent redirect to the canonical no-trailing-slash app root.
    Redirect { location: String },
    /// Relay the captured response byte-for-byte. Only the three allowlisted
    /// headers survive; apps cannot set arbitrary host-response headers.
    Passthrough {
        status: StatusCode,
        content_encoding: Option<HeaderValue>,
        content_type: Option<HeaderValue>,
        location: Option<HeaderValue>,
        body: Bytes,
    },
    /// App returned 401 and no actor is present; the host should send the
    /// user through login and retry.
    ReauthRequired,
    /// No version-control data for the requested revision; the app is
    /// bypassed entirely.
    NoVcsData,
}

pub struct FrameProxy {
    registry: Arc<FrameRegistry>,
}

impl FrameProxy {
    pub fn new(registry: Arc<FrameRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    /// Dispatch one page request to the app mounted at `mount_prefix`.
    ///
    /// The inbound request is consumed and rebuilt as a fresh sub-request;
    /// nothing the app sees aliases host state, preventing cross-app bleed.
    pub async fn serve(
        &self,
        repo: &RepoDescriptor,
        rev: &RevisionContext,
        actor_present: bool,
        app_id: &str,
        mount_prefix: &str,
        request: Request<Body>,
    ) -> FrameResult<FrameOutcome> {
        let (frames, _) = self.registry.frames_for(repo);
        let frame = frames
            .get(app_id)
            .cloned()
            .ok_or_else(|| FrameError::AppNotFound(app_id.to_string()))?;

        if !rev.has_vcs_data() {
            return Ok(FrameOutcome::NoVcsData);
        }

        let (parts, body) = request.into_parts();
        let path = parts.uri.path();
        let query = parts.uri.query();

        // The canonical URL for the app root page has no trailing slash.
        if path == format!("{mount_prefix}/") {
            let mut location = mount_prefix.to_string();
            if let Some(query) = query {
                location.push('?');
                location.push_str(query);
            }
            return Ok(FrameOutcome::Redirect { location });
        }

        let sub_path = match path.strip_prefix(mount_prefix) {
            Some(rest) if rest.len() < path.len() => {
                if rest.is_empty() {
                    // For the app handler, the root path is always "/".
                    "/"
                } else {
                    rest
                }
            }
            _ => {
                return Err(FrameError::RoutingInvariant {
                    prefix: mount_prefix.to_string(),
                    path: path.to_string(),
                })
            }
        };

        let path_and_query = match query {
            Some(query) => format!("{sub_path}?{query}"),
            None => sub_path.to_string(),
        };
        let sub_uri: Uri = path_and_query
            .parse()
            .map_err(|err| FrameError::Subrequest(format!("sub-request uri: {err}")))?;

        let mut sub_request = Request::builder()
            .method(parts.method.clone())
            .uri(sub_uri)
            .version(parts.version)
            .body(body)
            .map_err(|err| FrameError::Subrequest(format!("sub-request build: {err}")))?;
        *sub_request.headers_mut() = parts.headers.clone();
        sub_request.extensions_mut().insert(FrameScope {
            mount_prefix: mount_prefix.to_string(),
            repo_path: repo.path.clone(),
        });

        tracing::debug!(app = %frame.id, path = %sub_path, "dispatching frame sub-request");
        let response = match frame.handler.clone().oneshot(sub_request).await {
            Ok(response) => response,
            Err(infallible) => match infallible {},
        };

        // Fully buffer before any decision; the app never streams to the
        // real transport.
        let (response_parts, response_body) = response.into_parts();
        let body_bytes = axum::body::to_bytes(response_body, MAX_FRAME_RESPONSE_BYTES)
            .await
            .map_err(|err| FrameError::Subrequest(format!("buffer app response: {err}")))?;

        let headers = response_parts.headers;
        if headers
            .get(VERBATIM_HEADER)
            .is_some_and(|value| value == "true")
        {
            return Ok(FrameOutcome::Passthrough {
                status: response_parts.status,
                content_encoding: headers.get(CONTENT_ENCODING).cloned(),
                content_type: headers.get(CONTENT_TYPE).cloned(),
                location: headers.get(LOCATION).cloned(),
                body: body_bytes,
            });
        }

        let subtitle = headers
            .get(FRAME_TITLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body_text = String::from_utf8_lossy(&body_bytes).into_owned();

        let outcome = match response_parts.status {
            StatusCode::OK => FrameOutcome::Rendered(RenderedFrame {
                title: frame.title.clone(),
                subtitle,
                html: Some(body_text),
                error: None,
            }),
            StatusCode::UNAUTHORIZED if !actor_present => FrameOutcome::ReauthRequired,
            status => {
                tracing::debug!(app = %frame.id, %status, "frame returned non-200; rendering inline error");
                FrameOutcome::Rendered(RenderedFrame {
                    title: frame.title.clone(),
                    subtitle,
                    html: None,
                    error: Some(body_text),
                })
            }
        };
        Ok(outcome)
    }
}
