//! Request DTOs and JSON mapping helpers.
//!
//! Required fields are `Option` so a missing field becomes a 400 with the
//! documented message instead of a framework-shaped rejection.

use serde::Deserialize;

use noteforge_core::{Note, Tenant};
use noteforge_store::NoteWithAuthors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub tenant_slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn note_to_json(note: &Note) -> serde_json::Value {
    serde_json::json!({
        "id": note.id,
        "title": note.title,
        "content": note.content,
        "tenantId": note.tenant_id,
        "userId": note.user_id,
        "updatedBy": note.updated_by,
        "createdAt": note.created_at,
        "updatedAt": note.updated_at,
    })
}

pub fn note_with_authors_to_json(record: &NoteWithAuthors) -> serde_json::Value {
    let mut value = note_to_json(&record.note);
    value["authorEmail"] = serde_json::json!(record.author_email);
    value["lastEditorEmail"] = serde_json::json!(record.last_editor_email);
    value
}

pub fn tenant_to_json(tenant: &Tenant) -> serde_json::Value {
    serde_json::json!({
        "id": tenant.id,
        "slug": tenant.slug,
        "name": tenant.name,
        "plan": tenant.plan,
        "createdAt": tenant.created_at,
    })
}

/// The plan's note cap as it appears on the wire: a number, or the string
/// `"unlimited"`.
pub fn note_limit_to_json(plan: noteforge_core::Plan) -> serde_json::Value {
    match plan.note_limit() {
        Some(limit) => serde_json::json!(limit),
        None => serde_json::json!("unlimited"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noteforge_core::{NoteId, Plan, TenantId, UserId};

    #[test]
    fn note_json_uses_camel_case_keys() {
        let note = Note {
            id: NoteId::new(),
            title: "T".to_string(),
            content: "C".to_string(),
            tenant_id: TenantId::new(),
            user_id: UserId::new(),
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = note_to_json(&note);
        assert_eq!(value["title"], "T");
        assert!(value["createdAt"].is_string());
        assert!(value["updatedBy"].is_null());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn note_limit_renders_number_or_unlimited() {
        assert_eq!(note_limit_to_json(Plan::Free), serde_json::json!(3));
        assert_eq!(note_limit_to_json(Plan::Pro), serde_json::json!("unlimited"));
    }
}
