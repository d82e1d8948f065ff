use std::collections::HashMap;

use async_trait::async_trait;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use crate::claims::RawClaims;
use crate::config::SigningKey;
use crate::config::VerifierConfig;
use crate::error::key_error;
use crate::error::Error;
use crate::error::Result;
use crate::jwks_cache::JwksCache;

/// Trait for JWT verification
///
/// Implementations check the token signature and hand back the decoded payload.
/// Expiry and audience are left to the caller.
#[async_trait]
pub trait VerifyJwt: Send + Sync {
    /// Verify a JWT token and return its claims
    ///
    /// Fails with [`Error::SignatureInvalid`] for a bad signature and with
    /// [`Error::Verification`] for any other decoding or verification problem.
    async fn verify(&self, token: &str) -> Result<RawClaims>;
}

/// JWT verifier backed by static keys and an optional JWKS endpoint
///
/// Keys are looked up by the `kid` of the token header (or the configured
/// default key when the header has none): statically configured keys first,
/// then the cached JWKS.
pub struct UaaJwtVerifier {
    signing_keys: HashMap<String, SigningKey>,
    default_key: Option<String>,
    jwks_url: Option<String>,
    jwks_cache: JwksCache,
}

impl UaaJwtVerifier {
    /// Create a new JWT verifier with the given configuration
    pub fn new(config: VerifierConfig) -> Self {
        let client = config.http_client.unwrap_or_default();

        Self {
            signing_keys: config.signing_keys,
            default_key: config.default_key,
            jwks_url: config.jwks_url,
            jwks_cache: JwksCache::new(
                config.jwks_cache_ttl,
                config.jwks_min_refresh_interval,
                client,
            ),
        }
    }

    async fn resolve_key(&self, header: &Header) -> Result<DecodingKey> {
        let kid = header
            .kid
            .as_deref()
            .or(self.default_key.as_deref())
            .ok_or_else(|| {
                Error::Verification("missing 'kid' in the JWT header and no default key".into())
            })?;

        if let Some(key) = self.signing_keys.get(kid) {
            return get_configured_decoding_key(kid, key);
        }

        let Some(jwks_url) = self.jwks_url.as_deref() else {
            return Err(Error::Verification(format!("unknown signing key '{kid}'")));
        };

        let jwks = self.jwks_cache.get_jwks(jwks_url, kid).await?;
        get_decoding_key_for_kid(kid, &jwks)
    }
}

#[async_trait]
impl VerifyJwt for UaaJwtVerifier {
    async fn verify(&self, token: &str) -> Result<RawClaims> {
        let header = decode_header(token)?;
        let decoding_key = self.resolve_key(&header).await?;

        let token_data = decode::<RawClaims>(token, &decoding_key, &signature_only(&header))
            .inspect_err(|e| tracing::debug!("JWT verification failed: {e}"))?;

        Ok(token_data.claims)
    }
}

/// Validation settings that check the signature and nothing else
fn signature_only(header: &Header) -> Validation {
    let mut validation = Validation::new(header.alg);

    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    validation
}

fn get_configured_decoding_key(kid: &str, key: &SigningKey) -> Result<DecodingKey> {
    match key {
        SigningKey::Symmetric(secret) => Ok(DecodingKey::from_secret(secret.as_bytes())),
        SigningKey::RsaPem(pem) => {
            DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| key_error(kid, e))
        }
        SigningKey::EcPem(pem) => {
            DecodingKey::from_ec_pem(pem.as_bytes()).map_err(|e| key_error(kid, e))
        }
    }
}

/// Get the decoding key for the given key ID from the JWKS
fn get_decoding_key_for_kid(kid: &str, jwks: &JwkSet) -> Result<DecodingKey> {
    let jwk = jwks
        .find(kid)
        .ok_or_else(|| Error::Verification(format!("signing key '{kid}' not found in JWKS")))?;

    // Covers RSA, EC, OKP and octet keys, `k` of the latter is base64url
    DecodingKey::from_jwk(jwk).map_err(|e| key_error(kid, e))
}
