//! HTTP client for the federation root's identify endpoint.
use crate::api::types::IdentifyResponse;
use async_trait::async_trait;
use quarry_auth::{Actor, AuthError, AuthResult, FederationIdentify, Metadata, AUTHORIZATION_KEY};

/// Resolves identities against a remote federation root by forwarding the
/// original call metadata to its identify endpoint.
pub struct HttpFederationClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFederationClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FederationIdentify for HttpFederationClient {
    async fn identify(&self, metadata: &Metadata) -> AuthResult<Actor> {
        let url = format!("{}/v1/auth/identify", self.base_url);
        let mut request = self.client.get(&url);
        // Forward the original authorization metadata; the root performs
        // its own resolution from it.
        if let Some(value) = metadata.last(AUTHORIZATION_KEY) {
            request = request.header(AUTHORIZATION_KEY, value);
        }
        let response = request
            .send()
            .await
            .map_err(|err| AuthError::Federation(format!("identify request: {err}")))?;
        if !response.status().is_success() {
            return Err(AuthError::Federation(format!(
                "identify returned {}",
                response.status()
            )));
        }
        let identity: IdentifyResponse = response
            .json()
            .await
            .map_err(|err| AuthError::Federation(format!("decode identify response: {err}")))?;
        Ok(Actor {
            uid: identity.uid,
            login: identity.login,
            domain: identity.domain,
            client_id: identity.client_id,
            scope: Vec::new(),
        })
    }
}
