//! API error type and the auth/frame error mappings.
//!
//! # Purpose
//! Centralizes HTTP error response construction so error shapes stay
//! uniform across endpoints. Identity errors keep their meaning: a bad
//! credential format is a client error, a failed verification is 401, and
//! a federation failure surfaces as a gateway error instead of being
//! masked as unauthenticated.
use crate::api::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quarry_auth::AuthError;
use quarry_frames::FrameError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn api_bad_request(message: &str) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "bad_request", message)
}

pub fn api_unauthorized(message: &str) -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

pub fn api_not_found(message: &str) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not_found", message)
}

pub fn api_internal(message: &str) -> ApiError {
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MalformedCredential | AuthError::InvalidCredentialFormat => {
                api_bad_request(&err.to_string())
            }
            AuthError::Unauthenticated(_) => api_unauthorized(&err.to_string()),
            AuthError::Federation(_) => {
                tracing::error!(error = %err, "federation identify failed");
                ApiError::new(StatusCode::BAD_GATEWAY, "federation", err.to_string())
            }
            // The resolver absorbs this signal; seeing it here is a bug.
            AuthError::SignerKeyUnavailable { .. } => api_unauthorized(&err.to_string()),
        }
    }
}

impl From<FrameError> for ApiError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::AppNotFound(_) => api_not_found(&err.to_string()),
            FrameError::DuplicateFrame(_)
            | FrameError::RoutingInvariant { .. }
            | FrameError::Subrequest(_) => {
                tracing::error!(error = %err, "frame proxy failure");
                api_internal(&err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_expected_statuses() {
        let bad: ApiError = AuthError::InvalidCredentialFormat.into();
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);

        let unauth: ApiError = AuthError::Unauthenticated("nope".to_string()).into();
        assert_eq!(unauth.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unauth.body.code, "unauthorized");

        let federation: ApiError = AuthError::Federation("down".to_string()).into();
        assert_eq!(federation.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn frame_errors_map_to_expected_statuses() {
        let not_found: ApiError = FrameError::AppNotFound("wiki".to_string()).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let invariant: ApiError = FrameError::RoutingInvariant {
            prefix: "/a".to_string(),
            path: "/b".to_string(),
        }
        .into();
        assert_eq!(invariant.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
