use std::fmt;

use serde::{Deserialize, Serialize};

use super::Capability;

/// Which party is signing a timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalType {
    Client,
    Manager,
}

impl ApprovalType {
    pub fn capability(&self) -> Capability {
        match self {
            Self::Client => Capability::ClientReview,
            Self::Manager => Capability::ManagerReview,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for ApprovalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApprovalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "manager" => Ok(Self::Manager),
            other => Err(format!("unknown approval type: {other}")),
        }
    }
}

/// Opaque reference to a stored signature image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureRef(pub String);

impl SignatureRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignatureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
