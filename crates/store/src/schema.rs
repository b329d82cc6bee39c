//! Schema bootstrap, startup schema check, and seed data.
//!
//! The `updated_by` column predates some deployments, so startup performs one
//! explicit `information_schema` check and adds it when missing. Request
//! handlers never vary their queries on caught SQL errors.

use crate::{Store, StoreError};

const CREATE_TENANTS: &str = r#"
CREATE TABLE IF NOT EXISTS tenants (
    id UUID PRIMARY KEY,
    slug TEXT UNIQUE NOT NULL,
    name TEXT NOT NULL,
    plan TEXT NOT NULL DEFAULT 'free' CHECK (plan IN ('free', 'pro')),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'member' CHECK (role IN ('admin', 'member')),
    tenant_id UUID NOT NULL REFERENCES tenants (id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_NOTES: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    tenant_id UUID NOT NULL REFERENCES tenants (id),
    user_id UUID NOT NULL REFERENCES users (id),
    updated_by UUID REFERENCES users (id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_notes_tenant_id ON notes (tenant_id)",
    "CREATE INDEX IF NOT EXISTS idx_users_tenant_id ON users (tenant_id)",
    "CREATE INDEX IF NOT EXISTS idx_users_email ON users (email)",
];

/// Demo accounts created by [`Store::seed_demo_data`]; all share one
/// password supplied by the caller as a precomputed hash.
const SEED_TENANTS: &[(&str, &str)] = &[
    ("acme", "Acme Corporation"),
    ("globex", "Globex Corporation"),
];

const SEED_USERS: &[(&str, &str, &str)] = &[
    ("admin@acme.test", "admin", "acme"),
    ("user@acme.test", "member", "acme"),
    ("admin@globex.test", "admin", "globex"),
    ("user@globex.test", "member", "globex"),
];

impl Store {
    /// Create tables and indexes, then reconcile schema drift. Idempotent.
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        for statement in [CREATE_TENANTS, CREATE_USERS, CREATE_NOTES] {
            sqlx::query(statement).execute(self.pool()).await?;
        }
        for statement in CREATE_INDEXES {
            sqlx::query(statement).execute(self.pool()).await?;
        }

        self.ensure_updated_by_column().await?;

        tracing::info!("schema bootstrap complete");
        Ok(())
    }

    /// One-time schema-version check: notes created by older deployments lack
    /// the `updated_by` column.
    async fn ensure_updated_by_column(&self) -> Result<(), StoreError> {
        let present = sqlx::query(
            r#"
            SELECT column_name
            FROM information_schema.columns
            WHERE table_name = 'notes' AND column_name = 'updated_by'
            "#,
        )
        .fetch_optional(self.pool())
        .await?
        .is_some();

        if !present {
            tracing::info!("adding updated_by column to notes");
            sqlx::query(
                r#"
                ALTER TABLE notes
                ADD COLUMN updated_by UUID REFERENCES users (id) ON DELETE SET NULL
                "#,
            )
            .execute(self.pool())
            .await?;
        }

        Ok(())
    }

    /// Insert the demo tenants and users. Idempotent: existing rows are left
    /// untouched, so a restart never resets passwords or plans.
    pub async fn seed_demo_data(&self, password_hash: &str) -> Result<(), StoreError> {
        for (slug, name) in SEED_TENANTS.iter().copied() {
            self.ensure_tenant(slug, name).await?;
        }

        for (email, role, tenant_slug) in SEED_USERS.iter().copied() {
            let tenant = self
                .find_tenant_by_slug(tenant_slug)
                .await?
                .ok_or(StoreError::NotFound)?;

            let role = role
                .parse::<noteforge_core::Role>()
                .map_err(|e| StoreError::decode("seed role", e))?;

            sqlx::query(
                r#"
                INSERT INTO users (id, email, password_hash, role, tenant_id)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (email) DO NOTHING
                "#,
            )
            .bind(noteforge_core::UserId::new().as_uuid())
            .bind(email)
            .bind(password_hash)
            .bind(role.as_str())
            .bind(tenant.id.as_uuid())
            .execute(self.pool())
            .await?;
        }

        tracing::info!("seed data ensured");
        Ok(())
    }
}
