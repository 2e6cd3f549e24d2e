use serde::{Deserialize, Serialize};

/// Uniform error body returned by gateway endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Identity returned by the federation identify endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyResponse {
    pub uid: i64,
    pub login: String,
    pub domain: String,
    pub client_id: String,
}
