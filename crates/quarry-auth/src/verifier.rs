//! Access token verification and the external-signer trust downgrade.
use crate::context::RequestContext;
use crate::errors::{AuthError, AuthResult};
use crate::token::AccessClaims;
use crate::trust::TrustStore;
use crate::Actor;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyLookupError {
    /// The signer is known to be external and its key cannot be fetched
    /// from here. This is the federation-fallback signal, not a failure.
    #[error("verification key unavailable for signer {0}")]
    Unavailable(String),
    #[error("key lookup failed: {0}")]
    Lookup(String),
}

/// Source of verification keys for signers other than the two trust
/// anchors. Lookups run under an elevated context so that registered-client
/// keys resolve regardless of the caller's own privileges.
pub trait SignerKeyLookup: Send + Sync {
    fn verification_key(
        &self,
        elevated: &RequestContext,
        kid: &str,
    ) -> Result<DecodingKey, KeyLookupError>;
}

/// In-process signer registry backed by a kid -> PEM map.
#[derive(Default)]
pub struct StaticKeyRegistry {
    keys: HashMap<String, Vec<u8>>,
}

impl StaticKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kid: impl Into<String>, public_key_pem: impl Into<Vec<u8>>) {
        self.keys.insert(kid.into(), public_key_pem.into());
    }
}

impl SignerKeyLookup for StaticKeyRegistry {
    fn verification_key(
        &self,
        _elevated: &RequestContext,
        kid: &str,
    ) -> Result<DecodingKey, KeyLookupError> {
        let pem = self
            .keys
            .get(kid)
            .ok_or_else(|| KeyLookupError::Unavailable(kid.to_string()))?;
        DecodingKey::from_rsa_pem(pem).map_err(|err| KeyLookupError::Lookup(err.to_string()))
    }
}

/// A successfully verified token: the resulting actor plus the raw claims
/// it was built from.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub actor: Actor,
    pub claims: AccessClaims,
}

pub struct TokenVerifier {
    trust: Arc<TrustStore>,
    key_lookup: Arc<dyn SignerKeyLookup>,
    leeway: u64,
}

impl TokenVerifier {
    pub fn new(trust: Arc<TrustStore>, key_lookup: Arc<dyn SignerKeyLookup>, leeway: u64) -> Self {
        Self {
            trust,
            key_lookup,
            leeway,
        }
    }

    pub fn trust(&self) -> &TrustStore {
        &self.trust
    }

    /// Verify a bearer token and apply the trust downgrade.
    ///
    /// Errors:
    /// - `SignerKeyUnavailable` when the signer is external and its key
    ///   cannot be fetched; callers fall back to federation.
    /// - `Unauthenticated` for every other verification failure, including
    ///   an external client claiming another client's identity.
    pub fn verify(&self, elevated: &RequestContext, token: &str) -> AuthResult<VerifiedToken> {
        let header = jsonwebtoken::decode_header(token)
            .map_err(|err| AuthError::Unauthenticated(format!("undecodable token: {err}")))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::Unauthenticated("token header missing kid".to_string()))?;

        let fetched;
        let decoding_key = match self.trust.decoding_key_for(&kid) {
            Some(key) => key,
            None => {
                fetched = self
                    .key_lookup
                    .verification_key(elevated, &kid)
                    .map_err(|err| match err {
                        KeyLookupError::Unavailable(kid) => AuthError::SignerKeyUnavailable { kid },
                        KeyLookupError::Lookup(reason) => AuthError::Unauthenticated(reason),
                    })?;
                &fetched
            }
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = self.leeway;
        let decoded = jsonwebtoken::decode::<AccessClaims>(token, decoding_key, &validation)
            .map_err(|err| AuthError::Unauthenticated(format!("token verification: {err}")))?;
        let claims = decoded.claims;
        let mut actor = claims.actor();

        // Only tokens signed by us or the root carry full identity. A token
        // signed by a registered client proves nothing beyond that client's
        // own identity, and it must not claim someone else's.
        if !self.trust.is_self(&kid) && !self.trust.is_root(&kid) {
            if actor.client_id != kid {
                return Err(AuthError::Unauthenticated(format!(
                    "token signed by external client {kid:?} may only carry that client's own id (got {:?})",
                    actor.client_id
                )));
            }
            actor = Actor::external_client(&kid);
        }

        Ok(VerifiedToken { actor, claims })
    }
}
