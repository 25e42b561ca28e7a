use std::fmt;

use chrono::{DateTime, Utc};
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    exception::{TimesheetException, TimesheetResult},
    model::vo::{ApprovalType, Capability, HourTotals, SignatureRef},
};

#[derive(
    ToPrimitive, FromPrimitive, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetStatus {
    /// Waiting for the client's signature.
    PendingClientApproval,
    /// Client signed, waiting for the manager's signature.
    PendingFinalApproval,
    /// Terminal success, the only state export may run from.
    Completed,
    /// Sent back to the submitting crew chief for correction.
    Rejected,
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PendingClientApproval => "pending_client_approval",
            Self::PendingFinalApproval => "pending_final_approval",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Approval record of a finalized shift.
///
/// Every transition mutates status, the matching signature and the matching timestamp
/// together; persisting the whole entity in one versioned write keeps them consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub status: TimesheetStatus,
    pub submitted_by: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub client_signature: Option<SignatureRef>,
    pub client_approved_by: Option<Uuid>,
    pub client_approved_at: Option<DateTime<Utc>>,
    pub manager_signature: Option<SignatureRef>,
    pub manager_approved_by: Option<Uuid>,
    pub manager_approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    /// Frozen at finalization.
    pub hour_totals: HourTotals,
    /// Optimistic lock counter.
    pub version: i64,
}

impl Timesheet {
    const ENTITY: &'static str = "Timesheet";

    pub fn finalize(
        shift_id: Uuid,
        submitted_by: Uuid,
        hour_totals: HourTotals,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            shift_id,
            status: TimesheetStatus::PendingClientApproval,
            submitted_by,
            submitted_at: now,
            client_signature: None,
            client_approved_by: None,
            client_approved_at: None,
            manager_signature: None,
            manager_approved_by: None,
            manager_approved_at: None,
            rejection_reason: None,
            rejected_by: None,
            rejected_at: None,
            hour_totals,
            version: 0,
        }
    }

    /// Puts a rejected timesheet back in front of the client with freshly frozen totals.
    pub fn resubmit(
        &mut self,
        submitted_by: Uuid,
        hour_totals: HourTotals,
        now: DateTime<Utc>,
    ) -> TimesheetResult<()> {
        match self.status {
            TimesheetStatus::Rejected => {}
            TimesheetStatus::Completed => return Err(self.terminal()),
            other => {
                return Err(TimesheetException::invalid_state(format!(
                    "shift: {} is already finalized, timesheet: {} is {other}",
                    self.shift_id, self.id
                )))
            }
        }
        *self = Self {
            id: self.id,
            version: self.version,
            ..Self::finalize(self.shift_id, submitted_by, hour_totals, now)
        };
        Ok(())
    }

    /// Capability a reviewer needs to act on the timesheet at its current stage.
    pub fn review_capability(&self) -> TimesheetResult<Capability> {
        match self.status {
            TimesheetStatus::PendingClientApproval => Ok(Capability::ClientReview),
            TimesheetStatus::PendingFinalApproval => Ok(Capability::ManagerReview),
            TimesheetStatus::Completed => Err(self.terminal()),
            TimesheetStatus::Rejected => Err(TimesheetException::invalid_state(format!(
                "timesheet: {} was rejected and awaits resubmission",
                self.id
            ))),
        }
    }

    /// Checks `approval_type` is the signature the timesheet is waiting for.
    pub fn ensure_can_approve(&self, approval_type: ApprovalType) -> TimesheetResult<()> {
        match (approval_type, self.status) {
            (_, TimesheetStatus::Completed) => Err(self.terminal()),
            (ApprovalType::Client, TimesheetStatus::PendingClientApproval) => Ok(()),
            (ApprovalType::Manager, TimesheetStatus::PendingFinalApproval)
                if self.client_signature.is_some() && self.client_approved_at.is_some() =>
            {
                Ok(())
            }
            (ApprovalType::Manager, TimesheetStatus::PendingClientApproval)
            | (ApprovalType::Manager, TimesheetStatus::PendingFinalApproval) => {
                Err(TimesheetException::invalid_state(format!(
                    "timesheet: {} needs the client signature before manager approval",
                    self.id
                )))
            }
            (approval_type, status) => Err(TimesheetException::invalid_state(format!(
                "timesheet: {} is {status}, {approval_type} approval is not possible",
                self.id
            ))),
        }
    }

    pub fn approve(
        &mut self,
        approval_type: ApprovalType,
        signature: SignatureRef,
        approved_by: Uuid,
        now: DateTime<Utc>,
    ) -> TimesheetResult<()> {
        self.ensure_can_approve(approval_type)?;
        match approval_type {
            ApprovalType::Client => {
                self.client_signature = Some(signature);
                self.client_approved_by = Some(approved_by);
                self.client_approved_at = Some(now);
                self.status = TimesheetStatus::PendingFinalApproval;
            }
            ApprovalType::Manager => {
                self.manager_signature = Some(signature);
                self.manager_approved_by = Some(approved_by);
                self.manager_approved_at = Some(now);
                self.status = TimesheetStatus::Completed;
            }
        }
        Ok(())
    }

    pub fn reject(
        &mut self,
        reason: &str,
        rejected_by: Uuid,
        now: DateTime<Utc>,
    ) -> TimesheetResult<()> {
        let reason = Self::validate_reason(reason)?;
        self.review_capability()?;
        self.status = TimesheetStatus::Rejected;
        self.rejection_reason = Some(reason);
        self.rejected_by = Some(rejected_by);
        self.rejected_at = Some(now);
        Ok(())
    }

    pub fn validate_reason(reason: &str) -> TimesheetResult<String> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(TimesheetException::validation(
                "reason",
                "a rejection reason is required",
            ));
        }
        Ok(reason.to_owned())
    }

    pub fn ensure_exportable(&self) -> TimesheetResult<()> {
        if self.status != TimesheetStatus::Completed {
            return Err(TimesheetException::invalid_state(format!(
                "timesheet: {} is {}, only completed timesheets can be exported",
                self.id, self.status
            )));
        }
        Ok(())
    }

    /// Whether `other` is the same finalization of the shift, not a later resubmission.
    pub fn same_submission(&self, other: &Self) -> bool {
        self.id == other.id
            && self.submitted_at == other.submitted_at
            && self.hour_totals == other.hour_totals
    }

    pub fn signature(&self, kind: ApprovalType) -> Option<&SignatureRef> {
        match kind {
            ApprovalType::Client => self.client_signature.as_ref(),
            ApprovalType::Manager => self.manager_signature.as_ref(),
        }
    }

    fn terminal(&self) -> TimesheetException {
        TimesheetException::TerminalState {
            entity: Self::ENTITY,
            id: self.id,
        }
    }
}
