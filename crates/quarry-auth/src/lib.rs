//! Quarry authentication primitives shared by the gateway and tooling.
//!
//! # Purpose
//! Centralizes the actor model, bearer credential handling, the trust-anchor
//! store, access token verification, and per-request identity resolution.
//!
//! # How it fits
//! The gateway runs [`IdentityResolver::resolve`] once per inbound call to
//! turn `authorization` metadata into a [`RequestContext`]; downstream
//! handlers read the resolved [`Actor`] from that context. Deployments that
//! are not the federation root delegate unverifiable signers to the root via
//! a [`FederationIdentify`] implementation.
//!
//! # Key invariants
//! - Quarry tokens are RS256 only; the header `kid` names the signing key.
//! - Full identity claims are honored only for tokens signed by the local
//!   key or the federation root; any other signer is downgraded to a
//!   client-id-only actor.
//! - Trust keys are immutable for the process lifetime.
//!
//! # Common pitfalls
//! - Treating [`AuthError::SignerKeyUnavailable`] as a failure; it is the
//!   federation-fallback signal.
//! - Forgetting to attach outbound credentials when building contexts by
//!   hand; downstream calls then silently drop the caller's token.

mod actor;
mod context;
mod credentials;
mod errors;
mod resolver;
mod token;
mod trust;
mod verifier;

pub use actor::Actor;
pub use context::{RequestContext, INTERNAL_TMP_SCOPE};
pub use credentials::{parse_authorization, BearerCredential};
pub use errors::{AuthError, AuthResult};
pub use resolver::{
    FederationIdentify, IdentityResolver, Metadata, NoFederation, AUTHORIZATION_KEY,
};
pub use token::{AccessClaims, AccessTokenIssuer};
pub use trust::{TrustKey, TrustStore};
pub use verifier::{
    KeyLookupError, SignerKeyLookup, StaticKeyRegistry, TokenVerifier, VerifiedToken,
};
