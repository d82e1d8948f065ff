//! Scope to permission matching
//!
//! The [`ScopeMatcher`] trait is the seam the evaluator delegates every allow/deny
//! decision to. [`ScopePatternMatcher`] is the stock implementation understanding
//! scopes of the form:
//!
//! ```text
//! <permission>:<vhost_pattern>/<name_pattern>[/<routing_key_pattern>]
//! ```
//!
//! where `permission` is one of `configure`, `write` or `read`. Patterns are
//! percent-decoded (`%2F` stands for the `/` virtual host) and `*` matches any
//! run of characters. Scopes that do not follow this form are ignored.

use std::borrow::Cow;

use crate::resource::Permission;
use crate::resource::Resource;
use crate::resource::TopicContext;

/// Decides whether a set of scopes grants a requested access
pub trait ScopeMatcher: Send + Sync {
    fn vhost_access(&self, vhost: &str, scopes: &[String]) -> bool;

    fn resource_access(&self, resource: &Resource, permission: Permission, scopes: &[String])
        -> bool;

    fn topic_access(
        &self,
        resource: &Resource,
        permission: Permission,
        context: &TopicContext,
        scopes: &[String],
    ) -> bool;
}

/// Wildcard pattern based [`ScopeMatcher`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopePatternMatcher;

impl ScopeMatcher for ScopePatternMatcher {
    fn vhost_access(&self, vhost: &str, scopes: &[String]) -> bool {
        scope_permissions(scopes).any(|scope| wildcard_match(vhost, &scope.vhost))
    }

    fn resource_access(
        &self,
        resource: &Resource,
        permission: Permission,
        scopes: &[String],
    ) -> bool {
        scope_permissions(scopes).any(|scope| scope.grants(resource, permission))
    }

    fn topic_access(
        &self,
        resource: &Resource,
        permission: Permission,
        context: &TopicContext,
        scopes: &[String],
    ) -> bool {
        scope_permissions(scopes).any(|scope| {
            scope.grants(resource, permission)
                && wildcard_match(&context.routing_key, &scope.routing_key)
        })
    }
}

/// A scope parsed into its permission and patterns
#[derive(Debug, PartialEq, Eq)]
struct ScopePermission<'a> {
    permission: Permission,
    vhost: Cow<'a, str>,
    name: Cow<'a, str>,
    routing_key: Cow<'a, str>,
}

impl ScopePermission<'_> {
    fn grants(&self, resource: &Resource, permission: Permission) -> bool {
        self.permission == permission
            && wildcard_match(&resource.vhost, &self.vhost)
            && wildcard_match(&resource.name, &self.name)
    }
}

fn scope_permissions(scopes: &[String]) -> impl Iterator<Item = ScopePermission<'_>> {
    scopes.iter().filter_map(|scope| parse_scope(scope))
}

fn parse_scope(scope: &str) -> Option<ScopePermission<'_>> {
    let (permission, patterns) = scope.split_once(':')?;
    let permission = permission.parse::<Permission>().ok()?;

    let parts = patterns.split('/').collect::<Vec<_>>();
    let (vhost, name, routing_key) = match parts.as_slice() {
        [vhost, name] => (*vhost, *name, "*"),
        [vhost, name, routing_key] => (*vhost, *name, *routing_key),
        _ => return None,
    };

    Some(ScopePermission {
        permission,
        vhost: urlencoding::decode(vhost).ok()?,
        name: urlencoding::decode(name).ok()?,
        routing_key: urlencoding::decode(routing_key).ok()?,
    })
}

/// Match `value` against `pattern`, where `*` stands for any run of characters
fn wildcard_match(value: &str, pattern: &str) -> bool {
    let value = value.chars().collect::<Vec<_>>();
    let pattern = pattern.chars().collect::<Vec<_>>();

    let (mut v, mut p) = (0, 0);
    // Position of the last `*` seen and the value index it currently covers up to
    let mut backtrack: Option<(usize, usize)> = None;

    while v < value.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, v));
                p += 1;
            }
            Some(c) if *c == value[v] => {
                v += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, covered)) => {
                    p = star + 1;
                    v = covered + 1;
                    backtrack = Some((star, covered + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
