use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Shift;
use crate::model::vo::Capability;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromPrimitive, ToPrimitive,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    CrewChief,
    Employee,
    Client,
}

/// Scope of an explicit crew chief grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum GrantScope {
    Client(Uuid),
    Job(Uuid),
    Shift(Uuid),
}

impl GrantScope {
    pub fn covers(&self, shift: &Shift) -> bool {
        match *self {
            GrantScope::Client(id) => id == shift.client_company_id,
            GrantScope::Job(id) => id == shift.job_id,
            GrantScope::Shift(id) => id == shift.id,
        }
    }
}

/// What the user/role lookup returns about a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccess {
    pub user_id: Uuid,
    pub name: String,
    pub role: Role,
    /// Company a client user belongs to.
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub grants: Vec<GrantScope>,
}

impl UserAccess {
    /// The one place role semantics live.
    pub fn can(&self, capability: Capability, shift: &Shift) -> bool {
        use Capability::*;
        match self.role {
            Role::Admin | Role::Manager => true,
            Role::CrewChief => {
                matches!(
                    capability,
                    ClockWorker | EndShift | FinalizeTimesheet | ViewShift | ViewTimesheet
                ) && self.grants.iter().any(|g| g.covers(shift))
            }
            Role::Client => {
                matches!(capability, ClientReview | ViewShift | ViewTimesheet)
                    && self.company_id == Some(shift.client_company_id)
            }
            Role::Employee => false,
        }
    }
}
