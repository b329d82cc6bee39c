use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{NoteId, TenantId, UserId};

/// A note owned by a tenant.
///
/// `tenant_id` and `user_id` (the creator) are immutable after creation;
/// edits touch `title`, `content`, `updated_by` and `updated_at` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    /// Last editor, `None` until the note is first updated.
    pub updated_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
