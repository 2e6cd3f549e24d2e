use crate::actor::Actor;
use crate::errors::{AuthError, AuthResult};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Claims carried by a Quarry access token.
///
/// `kid` mirrors the signing key identifier into the claims; the trust
/// downgrade compares it (and `client_id`) against the signer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub kid: String,
    #[serde(default)]
    pub uid: i64,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub scope: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl AccessClaims {
    pub fn actor(&self) -> Actor {
        Actor {
            uid: self.uid,
            login: self.login.clone(),
            domain: self.domain.clone(),
            client_id: self.client_id.clone(),
            scope: self.scope.clone(),
        }
    }
}

/// Mints RS256 access tokens under the local signing key.
pub struct AccessTokenIssuer {
    key_id: String,
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl AccessTokenIssuer {
    pub fn from_rsa_pem(
        key_id: impl Into<String>,
        private_key_pem: &[u8],
        ttl: Duration,
    ) -> AuthResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|err| AuthError::Unauthenticated(format!("invalid signing key pem: {err}")))?;
        Ok(Self {
            key_id: key_id.into(),
            encoding_key,
            ttl,
        })
    }

    pub fn issue(&self, actor: &Actor) -> AuthResult<String> {
        let now = now_epoch_seconds();
        let claims = AccessClaims {
            kid: self.key_id.clone(),
            uid: actor.uid,
            login: actor.login.clone(),
            domain: actor.domain.clone(),
            client_id: actor.client_id.clone(),
            scope: actor.scope.clone(),
            exp: now + self.ttl.as_secs() as i64,
            iat: now,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key_id.clone());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|err| AuthError::Unauthenticated(format!("token encode failed: {err}")))
    }
}

pub(crate) fn now_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_secs() as i64
}
