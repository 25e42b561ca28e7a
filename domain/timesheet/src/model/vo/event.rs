use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow events handed to the notifier after a transition has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimesheetEvent {
    #[serde(rename_all = "camelCase")]
    ShiftEnded { shift_id: Uuid },
    #[serde(rename_all = "camelCase")]
    TimesheetFinalized {
        timesheet_id: Uuid,
        shift_id: Uuid,
        submitted_by: Uuid,
    },
    #[serde(rename_all = "camelCase")]
    ClientApproved {
        timesheet_id: Uuid,
        shift_id: Uuid,
        approved_by: Uuid,
    },
    #[serde(rename_all = "camelCase")]
    TimesheetCompleted {
        timesheet_id: Uuid,
        shift_id: Uuid,
        approved_by: Uuid,
    },
    #[serde(rename_all = "camelCase")]
    TimesheetRejected {
        timesheet_id: Uuid,
        shift_id: Uuid,
        rejected_by: Uuid,
        reason: String,
    },
}
