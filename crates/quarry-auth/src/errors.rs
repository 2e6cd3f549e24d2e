use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The authorization value did not contain exactly a scheme and a token.
    #[error("malformed bearer credential")]
    MalformedCredential,
    /// The authorization metadata entry could not be split into scheme/token.
    #[error("invalid authorization metadata")]
    InvalidCredentialFormat,
    /// The token is signed by a key this process cannot fetch. Not a hard
    /// failure: the resolver treats it as "externally signed, unresolved"
    /// and falls back to federation.
    #[error("verification key for signer {kid} is unavailable")]
    SignerKeyUnavailable { kid: String },
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    /// A federation identify call failed. Propagated unwrapped so callers
    /// can distinguish it from a local verification failure.
    #[error("federation identify failed: {0}")]
    Federation(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
