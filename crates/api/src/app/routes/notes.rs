//! Note CRUD. All reads and writes are scoped to the principal's tenant in
//! the query itself; a note id from another tenant is a plain 404.

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use noteforge_core::NoteId;
use noteforge_store::Store;

use crate::app::{dto, errors::ApiError};
use crate::context::CurrentUser;
use crate::middleware::{self, AuthState};

pub fn router(auth_state: AuthState) -> Router {
    Router::new()
        .route("/", post(create_note).get(list_notes))
        .route("/:id", get(get_note).put(update_note).delete(delete_note))
        .route_layer(axum::middleware::from_fn(middleware::require_member))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
}

pub async fn create_note(
    Extension(store): Extension<Store>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<dto::NoteRequest>,
) -> Result<axum::response::Response, ApiError> {
    let (title, content) = require_title(body)?;

    // tenant_id/user_id come from the authenticated principal, never from
    // the request body. The free-plan cap is enforced inside the store
    // transaction.
    let note = store
        .create_note(current.tenant_id, current.id, &title, &content)
        .await?;

    Ok((StatusCode::CREATED, Json(dto::note_to_json(&note))).into_response())
}

pub async fn list_notes(
    Extension(store): Extension<Store>,
    Extension(current): Extension<CurrentUser>,
) -> Result<axum::response::Response, ApiError> {
    let notes = store.list_notes(current.tenant_id).await?;

    let body: Vec<_> = notes.iter().map(dto::note_with_authors_to_json).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

pub async fn get_note(
    Extension(store): Extension<Store>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let note_id = parse_note_id(&id)?;

    let record = store
        .get_note(current.tenant_id, note_id)
        .await?
        .ok_or(ApiError::NotFound("Note not found"))?;

    Ok((StatusCode::OK, Json(dto::note_with_authors_to_json(&record))).into_response())
}

pub async fn update_note(
    Extension(store): Extension<Store>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<dto::NoteRequest>,
) -> Result<axum::response::Response, ApiError> {
    let (title, content) = require_title(body)?;
    let note_id = parse_note_id(&id)?;

    let note = store
        .update_note(current.tenant_id, note_id, current.id, &title, &content)
        .await?
        .ok_or(ApiError::NotFound("Note not found"))?;

    Ok((StatusCode::OK, Json(dto::note_to_json(&note))).into_response())
}

pub async fn delete_note(
    Extension(store): Extension<Store>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let note_id = parse_note_id(&id)?;

    let deleted = store.delete_note(current.tenant_id, note_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Note not found"));
    }

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Note deleted successfully" })),
    )
        .into_response())
}

fn require_title(body: dto::NoteRequest) -> Result<(String, String), ApiError> {
    let title = match body.title {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ApiError::validation("Title is required")),
    };
    Ok((title, body.content.unwrap_or_default()))
}

/// A malformed id cannot name a note in any tenant; report it exactly like
/// an absent row so nothing about id shape leaks.
fn parse_note_id(id: &str) -> Result<NoteId, ApiError> {
    id.parse().map_err(|_| ApiError::NotFound("Note not found"))
}
