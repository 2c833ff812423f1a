//! Visitors at the gate

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Visitor state as reported by the server.
///
/// The backend stores the raw decision word (`approve` / `deny`), so both the
/// verb and the participle decode to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorStatus {
    Pending,
    #[serde(alias = "approve")]
    Approved,
    #[serde(alias = "deny")]
    Denied,
    Entered,
    Exited,
}

impl VisitorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::Entered => "entered",
            Self::Exited => "exited",
        }
    }
}

impl fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resident's or admin's answer to a pending visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
}

impl Decision {
    /// Path segment understood by the decision endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Deny => "deny",
        }
    }

    pub fn outcome(&self) -> VisitorStatus {
        match self {
            Self::Approve => VisitorStatus::Approved,
            Self::Deny => VisitorStatus::Denied,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gate movements recorded by security.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Entered,
    Exited,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entered => "entered",
            Self::Exited => "exited",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub purpose: String,
    pub status: VisitorStatus,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
    /// When a resident or admin decided.
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub handled_at: Option<DateTime<Utc>>,
    /// Last gate movement.
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Visitor {
    pub fn is_pending(&self) -> bool {
        self.status == VisitorStatus::Pending
    }

    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.handled_at).or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(status: &str) -> Visitor {
        serde_json::from_value(serde_json::json!({
            "_id": "v1",
            "name": "Ravi",
            "purpose": "Delivery",
            "status": status,
            "created_at": "2024-05-01T10:00:00",
        }))
        .unwrap()
    }

    #[test]
    fn decision_words_decode_as_decided_states() {
        assert_eq!(visitor("approve").status, VisitorStatus::Approved);
        assert_eq!(visitor("approved").status, VisitorStatus::Approved);
        assert_eq!(visitor("deny").status, VisitorStatus::Denied);
        assert_eq!(visitor("entered").status, VisitorStatus::Entered);
    }

    #[test]
    fn only_pending_visitors_await_a_decision() {
        assert!(visitor("pending").is_pending());
        assert!(!visitor("deny").is_pending());
    }

    #[test]
    fn decisions_map_to_their_outcome() {
        assert_eq!(Decision::Approve.outcome(), VisitorStatus::Approved);
        assert_eq!(Decision::Deny.outcome(), VisitorStatus::Denied);
        assert_eq!(Decision::Deny.as_str(), "deny");
    }

    #[test]
    fn last_activity_prefers_gate_updates() {
        let mut v = visitor("entered");
        assert_eq!(v.last_activity(), v.created_at);
        v.updated_at = crate::domain::timestamp::parse("2024-05-01T11:00:00");
        assert_eq!(v.last_activity(), v.updated_at);
    }
}
