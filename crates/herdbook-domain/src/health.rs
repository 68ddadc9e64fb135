//! Health-flag domain types.
//!
//! Risk classifications are produced by an external flagging process and
//! consumed read-only by the reporting endpoints.

use serde::{Deserialize, Serialize};

/// Categorical risk classification attached to a health record.
///
/// Wire format: lowercase string (`"low"` | `"medium"` | `"high"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Parse from the wire string. Returns `None` for unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Wire string for storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Whether this classification counts toward the dashboard flagged total.
    /// Medium and high both flag; low does not.
    pub fn is_flagged(self) -> bool {
        matches!(self, Self::Medium | Self::High)
    }
}
