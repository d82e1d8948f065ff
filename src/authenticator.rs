use crate::claims::Audience;
use crate::claims::TokenClaims;
use crate::config::UaaConfig;
use crate::credentials::Credentials;
use crate::error::Error;
use crate::error::Result;
use crate::identity::AuthenticatedIdentity;
use crate::scope::filter_scopes;
use crate::verifier::VerifyJwt;

/// Turns a login attempt carrying a bearer token into an [`AuthenticatedIdentity`]
///
/// Expiry is not checked here, it is re-checked by the
/// [`ScopeEvaluator`](crate::ScopeEvaluator) on every authorization call.
pub struct TokenAuthenticator<V: VerifyJwt> {
    verifier: V,
    config: UaaConfig,
}

impl<V: VerifyJwt> TokenAuthenticator<V> {
    pub fn new(config: UaaConfig, verifier: V) -> Self {
        Self { verifier, config }
    }

    pub async fn authenticate(
        &self,
        username: Option<&str>,
        credentials: &Credentials,
    ) -> Result<AuthenticatedIdentity> {
        let token_source = self.config.token_source();
        let token = token_source
            .extract(username, credentials)
            .ok_or(Error::MissingToken)
            .inspect_err(|_| tracing::debug!("No token found in {token_source:?} credential"))?;

        let raw = self
            .verifier
            .verify(token)
            .await
            .inspect_err(|e| tracing::debug!("Token verification failed: {e}"))?;

        let claims = TokenClaims::from_raw(&raw)
            .and_then(|claims| self.validate_claims(claims))
            .inspect_err(|e| tracing::debug!("Token rejected: {e}"))?;

        let username = derive_username(&claims, token_source.fallback_username(username));
        tracing::debug!(username = ?username, scopes = ?claims.scope(), "Token authenticated");

        Ok(AuthenticatedIdentity::new(username, claims))
    }

    /// Check the audience and narrow the scopes to this resource server
    fn validate_claims(&self, claims: TokenClaims) -> Result<TokenClaims> {
        let resource_server_id = self.config.resource_server_id();

        check_audience(claims.aud(), resource_server_id)?;

        let scope = filter_scopes(claims.scope(), resource_server_id);
        Ok(claims.with_scope(scope))
    }
}

fn check_audience(aud: &Audience, resource_server_id: &str) -> Result<()> {
    if resource_server_id.is_empty() {
        return Ok(());
    }

    match aud {
        Audience::List(audiences) if audiences.iter().any(|a| a == resource_server_id) => Ok(()),
        Audience::List(audiences) => Err(Error::AudienceMismatch {
            expected: resource_server_id.to_string(),
            got: audiences.clone(),
        }),
        Audience::Other(_) => Err(Error::InvalidAudienceType),
    }
}

/// `client_id`, then `sub`, then whatever name the client supplied
fn derive_username(claims: &TokenClaims, fallback: Option<String>) -> Option<String> {
    claims
        .client_id()
        .or(claims.sub())
        .map(String::from)
        .or(fallback)
}
