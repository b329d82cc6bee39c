//! Tenant queries. Lookups for a principal always pair the requested slug
//! with the principal's tenant id, so a foreign slug is indistinguishable
//! from an absent one.

use sqlx::Row;
use sqlx::postgres::PgRow;

use noteforge_core::{Plan, Tenant, TenantId};

use crate::{Store, StoreError};

fn tenant_from_row(row: &PgRow) -> Result<Tenant, StoreError> {
    let plan = row
        .try_get::<String, _>("plan")?
        .parse::<Plan>()
        .map_err(|e| StoreError::decode("tenant plan", e))?;

    Ok(Tenant {
        id: TenantId::from_uuid(row.try_get("id")?),
        slug: row.try_get("slug")?,
        name: row.try_get("name")?,
        plan,
        created_at: row.try_get("created_at")?,
    })
}

impl Store {
    /// Unscoped lookup by slug (used by registration and seeding).
    pub async fn find_tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError> {
        sqlx::query("SELECT id, slug, name, plan, created_at FROM tenants WHERE slug = $1")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?
            .map(|row| tenant_from_row(&row))
            .transpose()
    }

    /// Tenant-scoped lookup: the slug must name the principal's own tenant.
    pub async fn find_tenant_for_principal(
        &self,
        slug: &str,
        tenant_id: TenantId,
    ) -> Result<Option<Tenant>, StoreError> {
        sqlx::query(
            "SELECT id, slug, name, plan, created_at FROM tenants WHERE slug = $1 AND id = $2",
        )
        .bind(slug)
        .bind(tenant_id.as_uuid())
        .fetch_optional(self.pool())
        .await?
        .map(|row| tenant_from_row(&row))
        .transpose()
    }

    /// Insert a tenant if absent, returning the stored row either way.
    pub async fn ensure_tenant(&self, slug: &str, name: &str) -> Result<Tenant, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tenants (id, slug, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(TenantId::new().as_uuid())
        .bind(slug)
        .bind(name)
        .execute(self.pool())
        .await?;

        self.find_tenant_by_slug(slug).await?.ok_or(StoreError::NotFound)
    }

    /// Upgrade `slug` to the pro plan on behalf of a principal of
    /// `tenant_id`.
    ///
    /// Runs in one transaction with the tenant row locked: a concurrent
    /// upgrade or note creation observes either the old or the new plan,
    /// never a half-applied state. Repeat upgrades are rejected, not
    /// absorbed.
    pub async fn upgrade_tenant_to_pro(
        &self,
        slug: &str,
        tenant_id: TenantId,
    ) -> Result<Tenant, StoreError> {
        let mut tx = self.pool().begin().await?;

        let row = sqlx::query(
            r#"
            SELECT id, slug, name, plan, created_at
            FROM tenants
            WHERE slug = $1 AND id = $2
            FOR UPDATE
            "#,
        )
        .bind(slug)
        .bind(tenant_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        let tenant = tenant_from_row(&row)?;
        if tenant.plan == Plan::Pro {
            return Err(StoreError::AlreadyPro);
        }

        sqlx::query("UPDATE tenants SET plan = 'pro' WHERE id = $1")
            .bind(tenant.id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(tenant = %tenant.slug, "tenant upgraded to pro");
        Ok(Tenant {
            plan: Plan::Pro,
            ..tenant
        })
    }

    pub async fn count_notes_for_tenant(&self, tenant_id: TenantId) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM notes WHERE tenant_id = $1")
            .bind(tenant_id.as_uuid())
            .fetch_one(self.pool())
            .await?;

        Ok(row.try_get("count")?)
    }

    pub async fn count_users_for_tenant(&self, tenant_id: TenantId) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE tenant_id = $1")
            .bind(tenant_id.as_uuid())
            .fetch_one(self.pool())
            .await?;

        Ok(row.try_get("count")?)
    }
}
