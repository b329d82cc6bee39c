use noteforge_core::{Plan, Role, TenantId, UserId};
use noteforge_store::UserWithTenant;

/// The authenticated principal attached to a request by the auth gate.
///
/// Resolved fresh from the store on every request: token validity alone is
/// not sufficient, the user row must still exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub tenant_id: TenantId,
    pub tenant_slug: String,
    pub tenant_plan: Plan,
}

impl From<UserWithTenant> for CurrentUser {
    fn from(record: UserWithTenant) -> Self {
        Self {
            id: record.user.id,
            email: record.user.email,
            role: record.user.role,
            tenant_id: record.tenant.id,
            tenant_slug: record.tenant.slug,
            tenant_plan: record.tenant.plan,
        }
    }
}
