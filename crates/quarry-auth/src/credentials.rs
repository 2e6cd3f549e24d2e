//! Bearer credential parsing and outbound propagation.
use crate::errors::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};

/// A bearer token presented by (or forwarded on behalf of) a caller.
///
/// Lifetime is one request: parsed from inbound metadata, then reused to
/// build the outbound `authorization` value so downstream calls re-present
/// the original token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerCredential {
    token: String,
}

impl BearerCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn token_type(&self) -> &'static str {
        "Bearer"
    }

    /// Rebuild the `authorization` header value for outbound calls.
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Split an `authorization` value into scheme and token.
///
/// Returns `Ok(None)` when the scheme is not case-insensitively `bearer`:
/// an unknown scheme skips verification rather than failing it. A value
/// without exactly two parts is malformed.
pub fn parse_authorization(value: &str) -> AuthResult<Option<BearerCredential>> {
    let mut parts = value.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = match parts.next() {
        Some(token) if !token.is_empty() => token,
        _ => return Err(AuthError::MalformedCredential),
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Ok(None);
    }
    Ok(Some(BearerCredential::new(token)))
}
