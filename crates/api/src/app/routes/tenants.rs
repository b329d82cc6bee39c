//! Tenant routes: info, plan upgrade, admin statistics.
//!
//! The path slug must always name the principal's own tenant; any other slug
//! is a 404 ("not found or access denied", never confirming existence).

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use noteforge_store::{Store, StoreError};

use crate::app::{dto, errors::ApiError};
use crate::context::CurrentUser;
use crate::middleware::{self, AuthState};

pub fn router(auth_state: AuthState) -> Router {
    let admin = Router::new()
        .route("/:slug/upgrade", post(upgrade_tenant))
        .route("/:slug/stats", get(tenant_stats))
        .route_layer(axum::middleware::from_fn(middleware::require_admin));

    Router::new()
        .route("/:slug", get(get_tenant))
        .merge(admin)
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
}

const TENANT_NOT_FOUND: ApiError = ApiError::NotFound("Tenant not found or access denied");

pub async fn get_tenant(
    Extension(store): Extension<Store>,
    Extension(current): Extension<CurrentUser>,
    Path(slug): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let tenant = store
        .find_tenant_for_principal(&slug, current.tenant_id)
        .await?
        .ok_or(TENANT_NOT_FOUND)?;

    let note_count = store.count_notes_for_tenant(tenant.id).await?;

    let mut body = dto::tenant_to_json(&tenant);
    body["noteCount"] = serde_json::json!(note_count);
    body["noteLimit"] = dto::note_limit_to_json(tenant.plan);
    body["canCreateNote"] =
        serde_json::json!(tenant.plan.allows_note_creation(note_count.max(0) as u32));

    Ok((StatusCode::OK, Json(body)).into_response())
}

pub async fn upgrade_tenant(
    Extension(store): Extension<Store>,
    Extension(current): Extension<CurrentUser>,
    Path(slug): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let tenant = store
        .upgrade_tenant_to_pro(&slug, current.tenant_id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => TENANT_NOT_FOUND,
            other => other.into(),
        })?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Tenant upgraded to Pro plan successfully",
            "tenant": dto::tenant_to_json(&tenant),
            "noteLimit": "unlimited",
            "upgradeDate": Utc::now(),
        })),
    )
        .into_response())
}

pub async fn tenant_stats(
    Extension(store): Extension<Store>,
    Extension(current): Extension<CurrentUser>,
    Path(slug): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let tenant = store
        .find_tenant_for_principal(&slug, current.tenant_id)
        .await?
        .ok_or(TENANT_NOT_FOUND)?;

    let note_count = store.count_notes_for_tenant(tenant.id).await?;
    let user_count = store.count_users_for_tenant(tenant.id).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "tenant": dto::tenant_to_json(&tenant),
            "stats": {
                "noteCount": note_count,
                "userCount": user_count,
                "noteLimit": dto::note_limit_to_json(tenant.plan),
            },
        })),
    )
        .into_response())
}
