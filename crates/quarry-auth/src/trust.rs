//! Process-wide trust anchors.
//!
//! # Purpose
//! Holds the two keys a deployment trusts unconditionally: its own signing
//! key and, when federated, the federation root's public key. Both are
//! loaded at process start and immutable for the process lifetime; key
//! rotation is out of scope.
use crate::errors::{AuthError, AuthResult};
use jsonwebtoken::DecodingKey;

/// A named public key this process trusts.
pub struct TrustKey {
    id: String,
    decoding_key: DecodingKey,
}

impl TrustKey {
    pub fn from_rsa_pem(id: impl Into<String>, public_key_pem: &[u8]) -> AuthResult<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|err| AuthError::Unauthenticated(format!("invalid trust key pem: {err}")))?;
        Ok(Self {
            id: id.into(),
            decoding_key,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl std::fmt::Debug for TrustKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustKey")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// The local key plus the optional federation root key.
///
/// An absent root key represents a non-federated deployment: `is_root` is
/// then always false.
pub struct TrustStore {
    self_key: TrustKey,
    root_key: Option<TrustKey>,
}

impl TrustStore {
    pub fn new(self_key: TrustKey, root_key: Option<TrustKey>) -> Self {
        Self { self_key, root_key }
    }

    pub fn is_self(&self, kid: &str) -> bool {
        self.self_key.id == kid
    }

    pub fn is_root(&self, kid: &str) -> bool {
        self.root_key.as_ref().is_some_and(|key| key.id == kid)
    }

    pub fn self_key_id(&self) -> &str {
        &self.self_key.id
    }

    /// Decoding key for one of the two configured trust anchors, if the
    /// signer is one of them.
    pub fn decoding_key_for(&self, kid: &str) -> Option<&DecodingKey> {
        if self.is_self(kid) {
            return Some(&self.self_key.decoding_key);
        }
        if self.is_root(kid) {
            return self.root_key.as_ref().map(TrustKey::decoding_key);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCAL_PUBLIC_KEY: &str = include_str!("../testdata/local-key.pub.pem");
    const EXTERNAL_PUBLIC_KEY: &str = include_str!("../testdata/external-key.pub.pem");

    fn store_with_root() -> TrustStore {
        TrustStore::new(
            TrustKey::from_rsa_pem("self-key", LOCAL_PUBLIC_KEY.as_bytes()).expect("self key"),
            Some(
                TrustKey::from_rsa_pem("root-key", EXTERNAL_PUBLIC_KEY.as_bytes())
                    .expect("root key"),
            ),
        )
    }

    #[test]
    fn self_and_root_lookups() {
        let store = store_with_root();
        assert!(store.is_self("self-key"));
        assert!(!store.is_self("root-key"));
        assert!(store.is_root("root-key"));
        assert!(!store.is_root("self-key"));
        assert!(!store.is_root("client-a"));
    }

    #[test]
    fn missing_root_key_means_never_root() {
        let store = TrustStore::new(
            TrustKey::from_rsa_pem("self-key", LOCAL_PUBLIC_KEY.as_bytes()).expect("self key"),
            None,
        );
        assert!(!store.is_root("root-key"));
        assert!(store.decoding_key_for("root-key").is_none());
    }

    #[test]
    fn decoding_key_only_for_configured_signers() {
        let store = store_with_root();
        assert!(store.decoding_key_for("self-key").is_some());
        assert!(store.decoding_key_for("root-key").is_some());
        assert!(store.decoding_key_for("client-a").is_none());
    }

    #[test]
    fn invalid_pem_is_rejected() {
        let err = TrustKey::from_rsa_pem("self-key", b"not-a-key").expect_err("bad pem");
        assert!(matches!(err, AuthError::Unauthenticated(_)));
    }
}
