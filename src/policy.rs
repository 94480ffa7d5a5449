//! Role and ownership rules.
//!
//! Role requirements are declared up front in an [`AccessPolicy`] table and
//! looked up by the access gate for every request. A route-level entry wins
//! over a scope-level default; a route with no requirement at either level is
//! public. Ownership is checked separately by handlers once the resource
//! owner is known.

use axum::http::Method;

use crate::error::{AppError, Result};
use crate::models::{User, UserType};

struct ScopeRule {
    prefix: &'static str,
    roles: Vec<UserType>,
}

struct RouteRule {
    method: Method,
    path: &'static str,
    roles: Vec<UserType>,
}

/// Per-route role declarations.
#[derive(Default)]
pub struct AccessPolicy {
    scopes: Vec<ScopeRule>,
    routes: Vec<RouteRule>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default roles for every route under `prefix` that has no entry of its own.
    pub fn scope(mut self, prefix: &'static str, roles: &[UserType]) -> Self {
        self.scopes.push(ScopeRule {
            prefix,
            roles: roles.to_vec(),
        });
        self
    }

    /// Roles for one method + route template. An empty slice marks the route public.
    pub fn route(mut self, method: Method, path: &'static str, roles: &[UserType]) -> Self {
        self.routes.push(RouteRule {
            method,
            path,
            roles: roles.to_vec(),
        });
        self
    }

    /// Roles required for a request, given its method and matched route template.
    pub fn required_roles(&self, method: &Method, path: &str) -> &[UserType] {
        if let Some(rule) = self
            .routes
            .iter()
            .find(|r| r.method == *method && r.path == path)
        {
            return &rule.roles;
        }

        self.scopes
            .iter()
            .filter(|s| in_scope(s.prefix, path))
            .max_by_key(|s| s.prefix.len())
            .map(|s| s.roles.as_slice())
            .unwrap_or(&[])
    }
}

fn in_scope(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Role declarations for the listing API.
pub fn route_table() -> AccessPolicy {
    use UserType::{Admin, Buyer, Realtor};

    AccessPolicy::new()
        .route(Method::GET, "/home", &[])
        .route(Method::GET, "/home/{id}", &[])
        .route(Method::POST, "/home", &[Realtor, Admin])
        .route(Method::PUT, "/home/{id}", &[Realtor, Admin])
        .route(Method::DELETE, "/home/{id}", &[Realtor, Admin])
        .route(Method::POST, "/home/{id}/inquire", &[Buyer])
        .route(Method::GET, "/home/{id}/messages", &[Realtor])
}

/// An empty requirement allows anyone; otherwise the user's role must be listed.
pub fn evaluate(required: &[UserType], user: &User) -> bool {
    required.is_empty() || required.contains(&user.user_type)
}

/// Fails with `Unauthorized` unless the acting user is the recorded owner.
pub fn check_ownership(owner_id: i64, acting_user_id: i64) -> Result<()> {
    if owner_id != acting_user_id {
        return Err(AppError::Unauthorized(
            "You do not own this listing".into(),
        ));
    }
    Ok(())
}
