use std::sync::Arc;

use crate::claims::TokenClaims;

/// Result of a successful login
///
/// Carries the validated claims so every later authorization call can re-check
/// them. Cloning is cheap, the claims are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedIdentity {
    username: Option<String>,
    tags: Vec<String>,
    claims: Arc<TokenClaims>,
}

impl AuthenticatedIdentity {
    pub fn new(username: Option<String>, claims: TokenClaims) -> Self {
        Self {
            username,
            tags: Vec::new(),
            claims: Arc::new(claims),
        }
    }

    /// Effective username, `None` when neither the token nor the client named one
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Username for consumers that need a string, empty when absent
    pub fn username_or_empty(&self) -> &str {
        self.username().unwrap_or_default()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    pub fn shared_claims(&self) -> Arc<TokenClaims> {
        Arc::clone(&self.claims)
    }
}
