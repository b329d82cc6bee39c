use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Number of notes a free-plan tenant may hold at creation time.
pub const FREE_PLAN_NOTE_LIMIT: u32 = 3;

/// Tenant-level subscription tier.
///
/// Upgrades are one-directional (`free` -> `pro`); there is no downgrade path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
        }
    }

    /// The note cap for this plan, `None` meaning unlimited.
    pub fn note_limit(&self) -> Option<u32> {
        match self {
            Plan::Free => Some(FREE_PLAN_NOTE_LIMIT),
            Plan::Pro => None,
        }
    }

    /// Whether a tenant on this plan holding `current_count` notes may
    /// create one more.
    pub fn allows_note_creation(&self, current_count: u32) -> bool {
        match self.note_limit() {
            Some(limit) => current_count < limit,
            None => true,
        }
    }
}

impl core::fmt::Display for Plan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            other => Err(DomainError::validation(format!(
                "plan must be 'free' or 'pro', got '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_caps_at_three_notes() {
        assert!(Plan::Free.allows_note_creation(0));
        assert!(Plan::Free.allows_note_creation(2));
        assert!(!Plan::Free.allows_note_creation(3));
        assert!(!Plan::Free.allows_note_creation(4));
    }

    #[test]
    fn pro_plan_is_unconstrained() {
        assert!(Plan::Pro.allows_note_creation(0));
        assert!(Plan::Pro.allows_note_creation(3));
        assert!(Plan::Pro.allows_note_creation(10_000));
        assert_eq!(Plan::Pro.note_limit(), None);
    }

    #[test]
    fn parses_known_plans() {
        assert_eq!("free".parse::<Plan>().unwrap(), Plan::Free);
        assert_eq!("pro".parse::<Plan>().unwrap(), Plan::Pro);
        assert!("enterprise".parse::<Plan>().is_err());
    }
}
