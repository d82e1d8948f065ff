use std::sync::Arc;

use crate::authenticator::TokenAuthenticator;
use crate::claims::TokenClaims;
use crate::config::UaaConfig;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::evaluator::ScopeEvaluator;
use crate::identity::AuthenticatedIdentity;
use crate::matcher::ScopeMatcher;
use crate::matcher::ScopePatternMatcher;
use crate::resource::Permission;
use crate::resource::Resource;
use crate::resource::TopicContext;
use crate::verifier::VerifyJwt;

/// Static metadata the broker shows for a registered auth backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendDescription {
    pub name: &'static str,
    pub description: &'static str,
}

/// Broker-facing auth backend: authentication plus authorization checks
///
/// Holds no mutable state, a single instance can serve all connections
/// concurrently.
pub struct UaaAuthBackend<V: VerifyJwt, M: ScopeMatcher = ScopePatternMatcher> {
    authenticator: TokenAuthenticator<V>,
    evaluator: ScopeEvaluator<M>,
}

impl<V: VerifyJwt> UaaAuthBackend<V> {
    /// Backend using the wildcard scope matcher
    pub fn new(config: UaaConfig, verifier: V) -> Self {
        Self::with_matcher(config, verifier, ScopePatternMatcher)
    }
}

impl<V: VerifyJwt, M: ScopeMatcher> UaaAuthBackend<V, M> {
    pub fn with_matcher(config: UaaConfig, verifier: V, matcher: M) -> Self {
        Self::from_parts(
            TokenAuthenticator::new(config, verifier),
            ScopeEvaluator::new(matcher),
        )
    }

    pub fn from_parts(authenticator: TokenAuthenticator<V>, evaluator: ScopeEvaluator<M>) -> Self {
        Self {
            authenticator,
            evaluator,
        }
    }

    pub fn description(&self) -> BackendDescription {
        BackendDescription {
            name: "UAA",
            description: "UAA (OAuth 2.0) token authentication / authorisation",
        }
    }

    pub async fn authenticate(
        &self,
        username: Option<&str>,
        credentials: &Credentials,
    ) -> Result<AuthenticatedIdentity> {
        self.authenticator.authenticate(username, credentials).await
    }

    /// Authenticate and hand back only the validated claims
    pub async fn authorize_login(
        &self,
        username: Option<&str>,
        credentials: &Credentials,
    ) -> Result<Arc<TokenClaims>> {
        let identity = self.authenticate(username, credentials).await?;
        Ok(identity.shared_claims())
    }

    pub fn check_vhost_access(
        &self,
        identity: &AuthenticatedIdentity,
        vhost: &str,
    ) -> Result<bool> {
        self.evaluator.check_vhost_access(identity, vhost)
    }

    pub fn check_resource_access(
        &self,
        identity: &AuthenticatedIdentity,
        resource: &Resource,
        permission: Permission,
    ) -> Result<bool> {
        self.evaluator
            .check_resource_access(identity, resource, permission)
    }

    pub fn check_topic_access(
        &self,
        identity: &AuthenticatedIdentity,
        resource: &Resource,
        permission: Permission,
        context: &TopicContext,
    ) -> Result<bool> {
        self.evaluator
            .check_topic_access(identity, resource, permission, context)
    }
}
