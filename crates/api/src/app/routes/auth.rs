//! Authentication routes: login, self-service registration, admin invites.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;

use noteforge_auth::{Claims, TokenCodec, password};
use noteforge_core::Role;
use noteforge_store::Store;

use crate::app::{dto, errors::ApiError};
use crate::context::CurrentUser;
use crate::middleware::{self, AuthState};

pub fn router(auth_state: AuthState) -> Router {
    let invite_routes = Router::new()
        .route("/invite", post(invite))
        .route_layer(axum::middleware::from_fn(middleware::require_admin))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .merge(invite_routes)
}

pub async fn login(
    Extension(store): Extension<Store>,
    Extension(codec): Extension<Arc<TokenCodec>>,
    Json(body): Json<dto::LoginRequest>,
) -> Result<axum::response::Response, ApiError> {
    let (email, plaintext) = match (body.email, body.password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => return Err(ApiError::validation("Email and password are required")),
    };

    // Unknown email and bad password produce the same response; no user
    // enumeration through the login endpoint.
    let auth = match store.find_auth_user_by_email(&email).await? {
        Some(a) if password::verify(&a.password_hash, &plaintext) => a,
        _ => {
            tracing::info!(email = %email, "rejected login");
            return Err(ApiError::Unauthorized("Invalid credentials"));
        }
    };

    let claims = Claims::new(
        auth.user.id,
        &auth.user.email,
        auth.user.role,
        auth.tenant.id,
        &auth.tenant.slug,
        Utc::now(),
    );
    let token = codec
        .issue(&claims)
        .map_err(|e| ApiError::internal(format!("token issuance failed: {e}")))?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token,
            "user": {
                "id": auth.user.id,
                "email": auth.user.email,
                "role": auth.user.role,
                "tenant": dto::tenant_to_json(&auth.tenant),
            },
        })),
    )
        .into_response())
}

pub async fn register(
    Extension(store): Extension<Store>,
    Json(body): Json<dto::RegisterRequest>,
) -> Result<axum::response::Response, ApiError> {
    let (email, plaintext, tenant_slug) = match (body.email, body.password, body.tenant_slug) {
        (Some(e), Some(p), Some(s)) if !e.is_empty() && !p.is_empty() && !s.is_empty() => {
            (e, p, s)
        }
        _ => {
            return Err(ApiError::validation(
                "Email, password, and tenant slug are required",
            ));
        }
    };

    let role = parse_role(body.role)?;

    let tenant = store
        .find_tenant_by_slug(&tenant_slug)
        .await?
        .ok_or_else(|| ApiError::validation("Invalid tenant"))?;

    let hash = password::hash(&plaintext)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

    let user_id = store.insert_user(&email, &hash, role, tenant.id).await?;

    tracing::info!(%user_id, tenant = %tenant.slug, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User created successfully",
            "userId": user_id,
        })),
    )
        .into_response())
}

/// Admin-only: create a user in the admin's own tenant with a generated
/// temporary password, returned once in the response.
pub async fn invite(
    Extension(store): Extension<Store>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<dto::InviteRequest>,
) -> Result<axum::response::Response, ApiError> {
    let email = match body.email {
        Some(e) if !e.is_empty() => e,
        _ => return Err(ApiError::validation("Email is required")),
    };

    let role = parse_role(body.role)?;

    let temp_password = password::generate_temp_password()
        .map_err(|e| ApiError::internal(format!("temp password generation failed: {e}")))?;
    let hash = password::hash(&temp_password)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

    let user_id = store
        .insert_user(&email, &hash, role, current.tenant_id)
        .await?;

    tracing::info!(%user_id, tenant = %current.tenant_slug, "user invited");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User invited successfully",
            "userId": user_id,
            "tempPassword": temp_password,
        })),
    )
        .into_response())
}

fn parse_role(role: Option<String>) -> Result<Role, ApiError> {
    match role {
        None => Ok(Role::Member),
        Some(r) => r.parse().map_err(|_| {
            ApiError::validation("Role must be 'admin' or 'member'")
        }),
    }
}
