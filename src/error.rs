use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("No token present in the provided credentials")]
    MissingToken,
    #[error("The signature of the provided JWT is invalid")]
    SignatureInvalid,
    #[error("JWT verification failed: {0}")]
    Verification(String),
    #[error("The provided JWT carries malformed claims: {0}")]
    MalformedClaims(String),
    #[error(
        "The provided JWT is not meant for this resource server. \
         Expected audience: {expected}, got: {got:?}"
    )]
    AudienceMismatch { expected: String, got: Vec<String> },
    #[error("The 'aud' claim of the provided JWT is not a list")]
    InvalidAudienceType,
    #[error("The provided JWT has expired. Expiration timestamp: {0}")]
    TokenExpired(i64),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub(crate) fn missing_claim(name: &str) -> Self {
        Self::MalformedClaims(format!("missing required claim '{name}'"))
    }

    pub(crate) fn claim_type(name: &str, expected: &str) -> Self {
        Self::MalformedClaims(format!("claim '{name}' must be {expected}"))
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => Error::SignatureInvalid,
            _ => Error::Verification(error.to_string()),
        }
    }
}

pub(crate) fn fetch_jwks_error(error: reqwest::Error) -> Error {
    tracing::error!("Failed to fetch JWKS: {error}");
    Error::Internal(format!("Failed to fetch JWKS: {error}"))
}

pub(crate) fn key_error(kid: &str, error: jsonwebtoken::errors::Error) -> Error {
    tracing::error!("Failed to build decoding key '{kid}': {error}");
    Error::Internal(format!("Failed to build decoding key '{kid}': {error}"))
}
