//! Request-scoped identity context.
//!
//! # Purpose
//! Carries the resolved actor and outbound credentials explicitly through
//! call signatures instead of hiding them in ambient per-thread state. The
//! context is an immutable value bundle: attaching an actor or credentials
//! produces a new context.
use crate::actor::Actor;
use crate::credentials::BearerCredential;

/// Scope granted to the internal elevated context used for signer key
/// lookups during token verification.
pub const INTERNAL_TMP_SCOPE: &str = "internal:tmp";

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    actor: Option<Actor>,
    credentials: Option<BearerCredential>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying the fixed internal scope. Key lookups for client
    /// verification run under this identity so they succeed regardless of
    /// the caller's own privileges.
    pub fn elevated() -> Self {
        Self::new().with_actor(Actor {
            scope: vec![INTERNAL_TMP_SCOPE.to_string()],
            ..Actor::default()
        })
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_credentials(mut self, credentials: BearerCredential) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    pub fn credentials(&self) -> Option<&BearerCredential> {
        self.credentials.as_ref()
    }
}
