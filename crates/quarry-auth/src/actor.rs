//! Resolved caller identity.
//!
//! # Purpose
//! Models the actor attached to a request context after token verification or
//! federation resolution. A `uid` of 0 means anonymous.
use serde::{Deserialize, Serialize};

/// Identity of the caller making a request.
///
/// Immutable once constructed; carried by the request context and never
/// persisted by this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub uid: i64,
    pub login: String,
    pub domain: String,
    pub client_id: String,
    pub scope: Vec<String>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Minimal actor produced by the trust downgrade: an externally signed
    /// token only proves "this named client made the call", so every field
    /// except the client ID is dropped.
    pub fn external_client(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.uid == 0 && self.login.is_empty() && self.client_id.is_empty()
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope.iter().any(|s| s == scope)
    }
}
