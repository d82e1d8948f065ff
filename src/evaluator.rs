use chrono::Utc;

use crate::claims::TokenClaims;
use crate::error::Error;
use crate::error::Result;
use crate::identity::AuthenticatedIdentity;
use crate::matcher::ScopeMatcher;
use crate::resource::Permission;
use crate::resource::Resource;
use crate::resource::TopicContext;

/// Source of the current Unix time in seconds
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    Utc::now().timestamp()
}

/// Answers permission checks for an authenticated identity
///
/// Every check first re-validates the expiry of the identity's token, then hands
/// the scopes to the [`ScopeMatcher`] and returns its verdict unchanged.
pub struct ScopeEvaluator<M: ScopeMatcher> {
    matcher: M,
    clock: Clock,
}

impl<M: ScopeMatcher> ScopeEvaluator<M> {
    pub fn new(matcher: M) -> Self {
        Self::with_clock(matcher, system_clock)
    }

    pub fn with_clock(matcher: M, clock: Clock) -> Self {
        Self { matcher, clock }
    }

    pub fn check_vhost_access(
        &self,
        identity: &AuthenticatedIdentity,
        vhost: &str,
    ) -> Result<bool> {
        let scopes = self.live_scopes(identity.claims())?;
        let allowed = self.matcher.vhost_access(vhost, scopes);

        tracing::trace!(vhost, allowed, "vhost access");
        Ok(allowed)
    }

    pub fn check_resource_access(
        &self,
        identity: &AuthenticatedIdentity,
        resource: &Resource,
        permission: Permission,
    ) -> Result<bool> {
        let scopes = self.live_scopes(identity.claims())?;
        let allowed = self.matcher.resource_access(resource, permission, scopes);

        tracing::trace!(?resource, %permission, allowed, "resource access");
        Ok(allowed)
    }

    pub fn check_topic_access(
        &self,
        identity: &AuthenticatedIdentity,
        resource: &Resource,
        permission: Permission,
        context: &TopicContext,
    ) -> Result<bool> {
        let scopes = self.live_scopes(identity.claims())?;
        let allowed = self
            .matcher
            .topic_access(resource, permission, context, scopes);

        tracing::trace!(
            ?resource,
            %permission,
            routing_key = %context.routing_key,
            allowed,
            "topic access"
        );
        Ok(allowed)
    }

    fn live_scopes<'a>(&self, claims: &'a TokenClaims) -> Result<&'a [String]> {
        check_expiry(claims, (self.clock)())?;
        Ok(claims.scope())
    }
}

/// A token is expired from the second named by its `exp` claim on
pub fn check_expiry(claims: &TokenClaims, now: i64) -> Result<()> {
    match claims.exp() {
        Some(exp) if exp <= now => {
            tracing::debug!(exp, now, "Token expired");
            Err(Error::TokenExpired(exp))
        }
        _ => Ok(()),
    }
}
