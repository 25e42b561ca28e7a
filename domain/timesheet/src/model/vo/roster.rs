use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkerState;
use crate::exception::{ExceptionKind, TimesheetException};

/// What a clock action or end shift hands back: the worker's fresh derived state.
pub type WorkerSnapshot = WorkerState;

/// Outcome of ending every worker on a shift. Each worker succeeds or fails on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEndShiftReport {
    pub shift_id: Uuid,
    /// Workers that are `shift_ended` after the call, including ones already ended before it.
    pub ended: Vec<WorkerSnapshot>,
    pub failures: Vec<WorkerFailure>,
}

impl BulkEndShiftReport {
    pub fn is_fully_successful(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerFailure {
    pub assignment_id: Uuid,
    pub employee_name: String,
    pub kind: ExceptionKind,
    pub message: String,
}

impl WorkerFailure {
    pub fn new(assignment_id: Uuid, employee_name: &str, error: &TimesheetException) -> Self {
        Self {
            assignment_id,
            employee_name: employee_name.to_owned(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
