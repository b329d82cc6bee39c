use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Role, TenantId, UserId};

/// A user account. Belongs to exactly one tenant; neither `tenant_id` nor
/// `role` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub tenant_id: TenantId,
    pub created_at: DateTime<Utc>,
}
