//! Per-request identity resolution.
//!
//! # Purpose
//! Runs once per inbound RPC before the target handler: parses the bearer
//! credential out of the call metadata, verifies it locally, and falls back
//! to the federation root when the signer cannot be verified here. The
//! result is a request context downstream code treats uniformly whether the
//! actor came from local verification, trust downgrade, or federation.
use crate::context::RequestContext;
use crate::credentials::{parse_authorization, BearerCredential};
use crate::errors::{AuthError, AuthResult};
use crate::verifier::TokenVerifier;
use crate::Actor;
use async_trait::async_trait;
use std::sync::Arc;

pub const AUTHORIZATION_KEY: &str = "authorization";

/// Ordered multimap of call metadata. Multiple values per key are allowed
/// for backward compatibility; the last supplied value is authoritative.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into().to_ascii_lowercase(), value.into()));
    }

    pub fn last(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Remote identity resolution on the federation root. Implementations
/// forward the original call metadata and invoke the root's parameterless
/// identify RPC.
#[async_trait]
pub trait FederationIdentify: Send + Sync {
    async fn identify(&self, metadata: &Metadata) -> AuthResult<Actor>;
}

/// Placeholder federation client for root deployments, which never
/// delegate. Calling it is a wiring bug.
pub struct NoFederation;

#[async_trait]
impl FederationIdentify for NoFederation {
    async fn identify(&self, _metadata: &Metadata) -> AuthResult<Actor> {
        Err(AuthError::Federation(
            "no federation root configured".to_string(),
        ))
    }
}

pub struct IdentityResolver {
    verifier: Arc<TokenVerifier>,
    federation: Arc<dyn FederationIdentify>,
    is_root: bool,
}

impl IdentityResolver {
    pub fn new(
        verifier: Arc<TokenVerifier>,
        federation: Arc<dyn FederationIdentify>,
        is_root: bool,
    ) -> Self {
        Self {
            verifier,
            federation,
            is_root,
        }
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Resolve the caller identity for one inbound call.
    ///
    /// Absence of credentials is not an error: the context comes back
    /// unchanged. A failed authentication attempt is.
    pub async fn resolve(
        &self,
        ctx: RequestContext,
        metadata: &Metadata,
    ) -> AuthResult<RequestContext> {
        let Some(auth_value) = metadata.last(AUTHORIZATION_KEY) else {
            return Ok(ctx);
        };

        let credential = match parse_authorization(auth_value) {
            Ok(Some(credential)) => credential,
            // Unknown scheme: verification is skipped, not failed.
            Ok(None) => return Ok(ctx),
            Err(AuthError::MalformedCredential) => {
                return Err(AuthError::InvalidCredentialFormat)
            }
            Err(err) => return Err(err),
        };

        let actor = match self
            .verifier
            .verify(&RequestContext::elevated(), credential.token())
        {
            Ok(verified) => Some(verified.actor),
            Err(AuthError::SignerKeyUnavailable { kid }) => {
                // Externally signed token we cannot verify. The token is
                // still re-presented on outgoing requests, but this server
                // does not trust the claimed identity locally.
                tracing::debug!(%kid, "token signed by unverifiable external key");
                if self.is_root {
                    // The root cannot ask itself to federate further;
                    // an unverifiable token resolves to anonymous.
                    None
                } else {
                    Some(self.federation.identify(metadata).await?)
                }
            }
            Err(err) => return Err(err),
        };

        // Future calls made with this context re-present the same token.
        let mut ctx = ctx.with_credentials(BearerCredential::new(credential.token()));
        if let Some(actor) = actor {
            ctx = ctx.with_actor(actor);
        }
        Ok(ctx)
    }
}
