//! Society roles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::ClientError;

/// Role carried by an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Resident,
    Admin,
    Security,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Resident, Role::Admin, Role::Security];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::Admin => "admin",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resident" => Ok(Self::Resident),
            "admin" => Ok(Self::Admin),
            "security" => Ok(Self::Security),
            other => Err(ClientError::Validation(format!("Unknown role: {other}"))),
        }
    }
}
