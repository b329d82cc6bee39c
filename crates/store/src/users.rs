//! User queries. Auth-path lookups join the tenant row so the caller gets
//! slug/name/plan in the same round-trip.

use sqlx::Row;
use sqlx::postgres::PgRow;

use noteforge_core::{Plan, Role, Tenant, TenantId, User, UserId};

use crate::error::on_unique_violation;
use crate::{Store, StoreError};

/// A user joined with its tenant, as resolved by the authorization gate.
#[derive(Debug, Clone)]
pub struct UserWithTenant {
    pub user: User,
    pub tenant: Tenant,
}

/// [`UserWithTenant`] plus the stored credential hash, for login only.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub tenant: Tenant,
    pub password_hash: String,
}

const USER_TENANT_COLUMNS: &str = r#"
    u.id, u.email, u.password_hash, u.role, u.tenant_id, u.created_at,
    t.id AS t_id, t.slug AS t_slug, t.name AS t_name, t.plan AS t_plan,
    t.created_at AS t_created_at
"#;

fn user_tenant_from_row(row: &PgRow) -> Result<(User, Tenant, String), StoreError> {
    let role = row
        .try_get::<String, _>("role")?
        .parse::<Role>()
        .map_err(|e| StoreError::decode("user role", e))?;
    let plan = row
        .try_get::<String, _>("t_plan")?
        .parse::<Plan>()
        .map_err(|e| StoreError::decode("tenant plan", e))?;

    let user = User {
        id: UserId::from_uuid(row.try_get("id")?),
        email: row.try_get("email")?,
        role,
        tenant_id: TenantId::from_uuid(row.try_get("tenant_id")?),
        created_at: row.try_get("created_at")?,
    };

    let tenant = Tenant {
        id: TenantId::from_uuid(row.try_get("t_id")?),
        slug: row.try_get("t_slug")?,
        name: row.try_get("t_name")?,
        plan,
        created_at: row.try_get("t_created_at")?,
    };

    Ok((user, tenant, row.try_get("password_hash")?))
}

impl Store {
    /// Credential lookup by email. Absence and bad password are collapsed to
    /// one failure by the caller; this just reports what is stored.
    pub async fn find_auth_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AuthUser>, StoreError> {
        let query = format!(
            "SELECT {USER_TENANT_COLUMNS} FROM users u JOIN tenants t ON u.tenant_id = t.id \
             WHERE u.email = $1"
        );

        sqlx::query(&query)
            .bind(email)
            .fetch_optional(self.pool())
            .await?
            .map(|row| {
                let (user, tenant, password_hash) = user_tenant_from_row(&row)?;
                Ok(AuthUser {
                    user,
                    tenant,
                    password_hash,
                })
            })
            .transpose()
    }

    /// Per-request principal resolution. A valid token whose user row is
    /// gone resolves to `None`, and the gate rejects it.
    pub async fn find_user_with_tenant(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserWithTenant>, StoreError> {
        let query = format!(
            "SELECT {USER_TENANT_COLUMNS} FROM users u JOIN tenants t ON u.tenant_id = t.id \
             WHERE u.id = $1"
        );

        sqlx::query(&query)
            .bind(user_id.as_uuid())
            .fetch_optional(self.pool())
            .await?
            .map(|row| {
                let (user, tenant, _) = user_tenant_from_row(&row)?;
                Ok(UserWithTenant { user, tenant })
            })
            .transpose()
    }

    /// Insert a user; a duplicate email surfaces as
    /// [`StoreError::DuplicateEmail`] via the unique constraint rather than a
    /// racy pre-check.
    pub async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
        tenant_id: TenantId,
    ) -> Result<UserId, StoreError> {
        let user_id = UserId::new();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, tenant_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(tenant_id.as_uuid())
        .execute(self.pool())
        .await
        .map_err(|e| on_unique_violation(e, StoreError::DuplicateEmail))?;

        Ok(user_id)
    }
}
