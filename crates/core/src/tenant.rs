use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Plan, TenantId};

/// An isolated organization. Tenants are created at provisioning time and
/// mutated only by the plan-upgrade operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    /// Unique, immutable, URL-safe handle (e.g. `acme`).
    pub slug: String,
    pub name: String,
    pub plan: Plan,
    pub created_at: DateTime<Utc>,
}
