//! Resident complaints

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::shared::ClientError;

/// Complaint lifecycle. `Pending -> Resolved` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    Pending,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue types offered by the complaint form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintCategory {
    Maintenance,
    Noise,
    Parking,
    Other,
}

impl ComplaintCategory {
    pub const ALL: [ComplaintCategory; 4] = [
        ComplaintCategory::Maintenance,
        ComplaintCategory::Noise,
        ComplaintCategory::Parking,
        ComplaintCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maintenance => "Maintenance",
            Self::Noise => "Noise",
            Self::Parking => "Parking",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintCategory {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClientError::Validation(format!("Unknown issue type: {wanted}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Category name as stored by the server.
    pub title: String,
    pub description: String,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub resident_id: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Complaint {
    /// Resolve is offered only while pending.
    pub fn can_resolve(&self) -> bool {
        self.status == ComplaintStatus::Pending
    }
}
