//! User domain types.

use serde::{Deserialize, Serialize};

/// Account role.
///
/// Wire format: lowercase string (`"farmer"` or `"vet"`), both in request
/// bodies and in the session-token `role` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Farmer,
    Vet,
}

impl UserRole {
    /// Parse from the wire string. Returns `None` for unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "farmer" => Some(Self::Farmer),
            "vet" => Some(Self::Vet),
            _ => None,
        }
    }

    /// Wire string for storage and token claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Vet => "vet",
        }
    }
}
