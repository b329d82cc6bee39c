use anyhow::{Context, bail};

/// Process configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub max_db_connections: u32,
    /// Create the demo tenants/users at startup (idempotent).
    pub seed_on_startup: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        // No insecure fallback: a missing signing secret is a deployment
        // misconfiguration and the process must not come up with one.
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.trim().is_empty() => s,
            _ => bail!("JWT_SECRET must be set to a non-empty value"),
        };

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let max_db_connections = std::env::var("MAX_DB_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let seed_on_startup = std::env::var("SEED_ON_STARTUP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            max_db_connections,
            seed_on_startup,
        })
    }
}
