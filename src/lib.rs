//! # UAA auth backend
//!
//! OAuth 2.0 bearer token authentication and scope based authorization for a
//! message broker's pluggable auth layer.
//!
//! A client logs in with a JWT (by default as its password). The token is
//! verified, its audience is checked against the configured resource server id
//! and its scopes are narrowed to the ones namespaced for this broker. Every
//! later vhost, resource or topic check re-validates the token expiry before a
//! [`ScopeMatcher`] decides.
//!
//! ## Features
//!
//! - JWT signature verification using static keys or a cached JWKS endpoint
//! - Audience validation against the resource server id
//! - Scope filtering, `"<resource_server_id>.read:vhost/*"` is seen as `"read:vhost/*"`
//! - Expiry re-checked on every authorization call
//! - Wildcard scope matching (`<permission>:<vhost>/<name>[/<routing_key>]`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use uaa_auth_backend::{
//!     Credentials, Permission, Resource, UaaAuthBackend, UaaConfig, UaaJwtVerifier,
//!     VerifierConfig,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let verifier = UaaJwtVerifier::new(VerifierConfig::with_jwks_url(
//!     "https://uaa.example.com/token_keys",
//! ));
//! let backend = UaaAuthBackend::new(UaaConfig::new("rabbitmq"), verifier);
//!
//! let identity = backend
//!     .authenticate(None, &Credentials::with_password("eyJhbG..."))
//!     .await?;
//!
//! let allowed = backend.check_resource_access(
//!     &identity,
//!     &Resource::queue("vh1", "orders"),
//!     Permission::Read,
//! )?;
//! println!("{:?} may read orders: {allowed}", identity.username());
//! # Ok(())
//! # }
//! ```

mod authenticator;
mod backend;
mod claims;
mod config;
mod credentials;
mod error;
mod evaluator;
mod identity;
mod jwks_cache;
mod matcher;
mod resource;
mod scope;
mod verifier;

// Re-exports for public API
pub use authenticator::TokenAuthenticator;
pub use backend::BackendDescription;
pub use backend::UaaAuthBackend;
pub use claims::Audience;
pub use claims::RawClaims;
pub use claims::TokenClaims;
pub use config::SigningKey;
pub use config::UaaConfig;
pub use config::VerifierConfig;
pub use credentials::Credentials;
pub use credentials::TokenSource;
pub use error::Error;
pub use error::Result;
pub use evaluator::check_expiry;
pub use evaluator::Clock;
pub use evaluator::ScopeEvaluator;
pub use identity::AuthenticatedIdentity;
pub use matcher::ScopeMatcher;
pub use matcher::ScopePatternMatcher;
pub use resource::Permission;
pub use resource::Resource;
pub use resource::ResourceKind;
pub use resource::TopicContext;
pub use scope::filter_scopes;
pub use verifier::UaaJwtVerifier;
pub use verifier::VerifyJwt;
