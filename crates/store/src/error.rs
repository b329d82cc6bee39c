use thiserror::Error;

/// Persistence-layer error.
///
/// Domain-meaningful outcomes (not found, duplicates, plan limits) get their
/// own variants so the API layer can map them to stable responses without
/// inspecting SQL state; everything else stays behind [`StoreError::Db`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("email already registered")]
    DuplicateEmail,

    #[error("tenant is already on the pro plan")]
    AlreadyPro,

    #[error("note limit reached for free plan")]
    LimitReached,

    #[error("corrupt row: {0}")]
    Decode(String),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

impl StoreError {
    /// True when the failure is transient (pool exhausted / connection lost)
    /// and the client may retry.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Db(sqlx::Error::PoolTimedOut) | StoreError::Db(sqlx::Error::Io(_))
        )
    }

    pub(crate) fn decode(what: &str, err: impl core::fmt::Display) -> Self {
        StoreError::Decode(format!("{what}: {err}"))
    }
}

/// Map a sqlx error, translating unique-constraint violations.
pub(crate) fn on_unique_violation(err: sqlx::Error, mapped: StoreError) -> StoreError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => mapped,
        _ => StoreError::Db(err),
    }
}
