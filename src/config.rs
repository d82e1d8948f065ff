use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::credentials::TokenSource;

/// Configuration of the authentication backend
///
/// Built once by the host and injected into the authenticator; it is never
/// mutated afterwards.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UaaConfig {
    /// Identifier of this broker as an audience and scope prefix.
    /// Empty disables the audience check and scope filtering.
    pub(crate) resource_server_id: String,
    /// Where the bearer token is taken from in the login credentials
    pub(crate) token_source: TokenSource,
}

impl UaaConfig {
    pub fn new(resource_server_id: impl Into<String>) -> Self {
        Self {
            resource_server_id: resource_server_id.into(),
            token_source: TokenSource::default(),
        }
    }

    /// Set the credential field the token is extracted from
    pub fn with_token_source(mut self, token_source: TokenSource) -> Self {
        self.token_source = token_source;
        self
    }

    pub fn resource_server_id(&self) -> &str {
        &self.resource_server_id
    }

    pub fn token_source(&self) -> TokenSource {
        self.token_source
    }
}

/// Key material used to verify token signatures
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SigningKey {
    /// Shared HMAC secret (HS256/HS384/HS512)
    Symmetric(String),
    /// PEM encoded RSA public key
    RsaPem(String),
    /// PEM encoded EC public key
    EcPem(String),
}

/// Configuration for the JWT verifier
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Statically configured keys, by key id
    pub(crate) signing_keys: HashMap<String, SigningKey>,
    /// Key id used for tokens whose header carries no `kid`
    pub(crate) default_key: Option<String>,
    /// JWKS endpoint consulted for key ids not configured statically
    pub(crate) jwks_url: Option<String>,
    /// Time-to-live for cached JWKS (default: 1 hour)
    pub(crate) jwks_cache_ttl: Duration,
    /// Minimum time between two fetches triggered by an unknown `kid` (default: 30 seconds)
    pub(crate) jwks_min_refresh_interval: Duration,
    /// Optional custom HTTP client for fetching JWKS
    /// If not provided, a default client will be created
    pub(crate) http_client: Option<Client>,
}

const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_JWKS_MIN_REFRESH_INTERVAL_SECS: u64 = 30;

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            signing_keys: HashMap::new(),
            default_key: None,
            jwks_url: None,
            jwks_cache_ttl: Duration::from_secs(DEFAULT_JWKS_CACHE_TTL_SECS),
            jwks_min_refresh_interval: Duration::from_secs(DEFAULT_JWKS_MIN_REFRESH_INTERVAL_SECS),
            http_client: None,
        }
    }
}

impl VerifierConfig {
    /// Create a configuration that resolves keys from the given JWKS endpoint
    pub fn with_jwks_url(jwks_url: impl Into<String>) -> Self {
        Self {
            jwks_url: Some(jwks_url.into()),
            ..Self::default()
        }
    }

    /// Add a statically configured signing key
    pub fn with_signing_key(mut self, kid: impl Into<String>, key: SigningKey) -> Self {
        self.signing_keys.insert(kid.into(), key);
        self
    }

    /// Set the key id used when a token header has no `kid`
    pub fn with_default_key(mut self, kid: impl Into<String>) -> Self {
        self.default_key = Some(kid.into());
        self
    }

    /// Set the JWKS cache TTL
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.jwks_cache_ttl = ttl;
        self
    }

    /// Set how long an unknown `kid` waits before it may trigger another JWKS fetch
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.jwks_min_refresh_interval = interval;
        self
    }

    /// Set a custom HTTP client
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}
