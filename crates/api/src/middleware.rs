//! Tenant-scoped authorization gate.
//!
//! Per request: extract the bearer token, validate it, then re-resolve the
//! user row (a deleted account holding a still-valid token must not pass).
//! Role gates run after the principal is attached.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use noteforge_auth::TokenCodec;
use noteforge_core::Role;
use noteforge_store::Store;

use crate::app::errors::ApiError;
use crate::context::CurrentUser;

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<TokenCodec>,
    pub store: Store,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    let claims = state
        .codec
        .decode(token)
        .map_err(|_| ApiError::Forbidden("Invalid or expired token"))?;

    let record = state
        .store
        .find_user_with_tenant(claims.sub)
        .await?
        .ok_or(ApiError::Forbidden("User not found"))?;

    req.extensions_mut().insert(CurrentUser::from(record));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("Access token required"))?;

    let header = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Access token required"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized("Access token required"))?
        .trim();

    if token.is_empty() {
        return Err(ApiError::Unauthorized("Access token required"));
    }

    Ok(token)
}

/// Second gate: the resolved principal's role must be in the allowed set.
fn check_role(req: &Request, allowed: &[Role]) -> Result<(), ApiError> {
    let current = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(ApiError::Unauthorized("Authentication required"))?;

    if allowed.contains(&current.role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Insufficient permissions"))
    }
}

pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    check_role(&req, &[Role::Admin])?;
    Ok(next.run(req).await)
}

pub async fn require_member(req: Request, next: Next) -> Result<Response, ApiError> {
    check_role(&req, &[Role::Admin, Role::Member])?;
    Ok(next.run(req).await)
}
