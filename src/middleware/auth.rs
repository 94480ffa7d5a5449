use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::db::{self, AppState, DbPool, queries};
use crate::error::AppError;
use crate::jwt::{IdentityClaim, TokenError};
use crate::models::{User, UserType};
use crate::policy;

/// The authenticated caller, inserted into request extensions by the gate.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    pub identity: IdentityClaim,
}

/// Why the gate denied a request. Logged, never returned to the client.
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("missing bearer token")]
    MissingToken,

    #[error(transparent)]
    InvalidToken(#[from] TokenError),

    #[error("user {0} does not exist")]
    UserNotFound(i64),

    #[error("role {0:?} is not permitted")]
    RoleNotPermitted(UserType),

    #[error("identity lookup failed: {0}")]
    Lookup(AppError),
}

/// Extract a Bearer token from the Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Map a verified identity to the stored user.
pub async fn resolve_identity(db: &DbPool, claim: &IdentityClaim) -> Result<User, AuthFailure> {
    let user_id = claim.user_id;
    db::with_conn(db, move |conn| queries::get_user_by_id(conn, user_id))
        .await
        .map_err(AuthFailure::Lookup)?
        .ok_or(AuthFailure::UserNotFound(user_id))
}

/// Verify the bearer token, load the user, and check their role.
pub async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    required: &[UserType],
) -> Result<AuthContext, AuthFailure> {
    let token = extract_bearer_token(headers).ok_or(AuthFailure::MissingToken)?;
    let identity = state.tokens.verify(token)?;
    let user = resolve_identity(&state.db, &identity).await?;

    if !policy::evaluate(required, &user) {
        return Err(AuthFailure::RoleNotPermitted(user.user_type));
    }

    Ok(AuthContext { user, identity })
}

/// Route gate. Public routes pass straight through; gated routes need a
/// valid token for an existing user whose role is declared for the route.
/// Every failure is the same 403 to the caller.
pub async fn access_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let method = request.method().clone();

    let required = state.policy.required_roles(&method, &path);
    if required.is_empty() {
        return Ok(next.run(request).await);
    }

    let outcome = authorize(&state, request.headers(), required).await;
    match outcome {
        Ok(ctx) => {
            request.extensions_mut().insert(ctx);
            Ok(next.run(request).await)
        }
        Err(AuthFailure::Lookup(e)) => {
            tracing::warn!(%method, %path, error = %e, "Access denied: identity lookup failed");
            Err(AppError::Forbidden("Forbidden resource".into()))
        }
        Err(reason) => {
            tracing::debug!(%method, %path, %reason, "Access denied");
            Err(AppError::Forbidden("Forbidden resource".into()))
        }
    }
}
