use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use noteforge_core::{Role, TenantId, UserId};

/// Session token lifetime. Tokens are stateless: there is no revocation
/// list, so a token stays valid until natural expiry.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried inside a session token.
///
/// The token is self-contained: everything the gate needs to route and
/// scope a request is encoded here, but the user row is still re-resolved
/// per request so a deleted account cannot ride out its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject / user identifier.
    pub sub: UserId,
    pub email: String,
    pub role: Role,
    pub tenant_id: TenantId,
    pub tenant_slug: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiration, unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Build claims for a freshly authenticated user, expiring
    /// [`TOKEN_TTL_HOURS`] from `issued_at`.
    pub fn new(
        sub: UserId,
        email: impl Into<String>,
        role: Role,
        tenant_id: TenantId,
        tenant_slug: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub,
            email: email.into(),
            role,
            tenant_id,
            tenant_slug: tenant_slug.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_expire_24_hours_after_issuance() {
        let now = Utc::now();
        let claims = Claims::new(
            UserId::new(),
            "admin@acme.test",
            Role::Admin,
            TenantId::new(),
            "acme",
            now,
        );

        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }
}
