//! Note queries. Every statement carries the principal's `tenant_id`; an id
//! from another tenant behaves exactly like an absent id.

use sqlx::Row;
use sqlx::postgres::PgRow;

use noteforge_core::{Note, NoteId, Plan, TenantId, UserId};

use crate::{Store, StoreError};

/// A note joined with the creator's email and, when the note has been
/// edited, the last editor's email.
#[derive(Debug, Clone)]
pub struct NoteWithAuthors {
    pub note: Note,
    pub author_email: String,
    pub last_editor_email: Option<String>,
}

fn note_from_row(row: &PgRow) -> Result<Note, StoreError> {
    Ok(Note {
        id: NoteId::from_uuid(row.try_get("id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        tenant_id: TenantId::from_uuid(row.try_get("tenant_id")?),
        user_id: UserId::from_uuid(row.try_get("user_id")?),
        updated_by: row
            .try_get::<Option<uuid::Uuid>, _>("updated_by")?
            .map(UserId::from_uuid),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn note_with_authors_from_row(row: &PgRow) -> Result<NoteWithAuthors, StoreError> {
    Ok(NoteWithAuthors {
        note: note_from_row(row)?,
        author_email: row.try_get("author_email")?,
        last_editor_email: row.try_get("last_editor_email")?,
    })
}

const NOTE_WITH_AUTHORS: &str = r#"
SELECT n.id, n.title, n.content, n.tenant_id, n.user_id, n.updated_by,
       n.created_at, n.updated_at,
       a.email AS author_email,
       e.email AS last_editor_email
FROM notes n
JOIN users a ON n.user_id = a.id
LEFT JOIN users e ON n.updated_by = e.id
"#;

impl Store {
    /// Create a note, enforcing the free-plan cap.
    ///
    /// The tenant row is locked (`FOR UPDATE`) for the duration of the
    /// count-check + insert, so two concurrent creates from one tenant at
    /// count=2 serialize and the second is rejected: strict enforcement,
    /// not best-effort. The plan is re-read under the lock so an upgrade
    /// that lands mid-flight is honored.
    pub async fn create_note(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        title: &str,
        content: &str,
    ) -> Result<Note, StoreError> {
        let mut tx = self.pool().begin().await?;

        let plan_row = sqlx::query("SELECT plan FROM tenants WHERE id = $1 FOR UPDATE")
            .bind(tenant_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound)?;

        let plan = plan_row
            .try_get::<String, _>("plan")?
            .parse::<Plan>()
            .map_err(|e| StoreError::decode("tenant plan", e))?;

        if plan.note_limit().is_some() {
            let count_row =
                sqlx::query("SELECT COUNT(*) AS count FROM notes WHERE tenant_id = $1")
                    .bind(tenant_id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await?;
            let count: i64 = count_row.try_get("count")?;

            if !plan.allows_note_creation(count.max(0) as u32) {
                return Err(StoreError::LimitReached);
            }
        }

        let row = sqlx::query(
            r#"
            INSERT INTO notes (id, title, content, tenant_id, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, content, tenant_id, user_id, updated_by,
                      created_at, updated_at
            "#,
        )
        .bind(NoteId::new().as_uuid())
        .bind(title)
        .bind(content)
        .bind(tenant_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        let note = note_from_row(&row)?;
        tx.commit().await?;

        Ok(note)
    }

    /// All notes of a tenant, newest-created-first.
    pub async fn list_notes(&self, tenant_id: TenantId) -> Result<Vec<NoteWithAuthors>, StoreError> {
        let query = format!("{NOTE_WITH_AUTHORS} WHERE n.tenant_id = $1 ORDER BY n.created_at DESC");

        sqlx::query(&query)
            .bind(tenant_id.as_uuid())
            .fetch_all(self.pool())
            .await?
            .iter()
            .map(note_with_authors_from_row)
            .collect()
    }

    pub async fn get_note(
        &self,
        tenant_id: TenantId,
        note_id: NoteId,
    ) -> Result<Option<NoteWithAuthors>, StoreError> {
        let query = format!("{NOTE_WITH_AUTHORS} WHERE n.id = $1 AND n.tenant_id = $2");

        sqlx::query(&query)
            .bind(note_id.as_uuid())
            .bind(tenant_id.as_uuid())
            .fetch_optional(self.pool())
            .await?
            .map(|row| note_with_authors_from_row(&row))
            .transpose()
    }

    /// Update title/content, stamping the editor. Existence and tenant
    /// ownership are checked by the same statement that mutates; `created_at`
    /// and `user_id` are never touched.
    pub async fn update_note(
        &self,
        tenant_id: TenantId,
        note_id: NoteId,
        editor: UserId,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, StoreError> {
        sqlx::query(
            r#"
            UPDATE notes
            SET title = $1, content = $2, updated_by = $3, updated_at = now()
            WHERE id = $4 AND tenant_id = $5
            RETURNING id, title, content, tenant_id, user_id, updated_by,
                      created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(editor.as_uuid())
        .bind(note_id.as_uuid())
        .bind(tenant_id.as_uuid())
        .fetch_optional(self.pool())
        .await?
        .map(|row| note_from_row(&row))
        .transpose()
    }

    /// Delete a note. Returns `false` when no row matched; repeating a
    /// delete is a not-found, not a success.
    pub async fn delete_note(
        &self,
        tenant_id: TenantId,
        note_id: NoteId,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND tenant_id = $2")
            .bind(note_id.as_uuid())
            .bind(tenant_id.as_uuid())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
