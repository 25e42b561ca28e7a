use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkerStatus;
use crate::{
    exception::{TimesheetException, TimesheetResult},
    model::entity::{AssignedPersonnel, Shift, TimeEntry},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub not_started: usize,
    pub clocked_in: usize,
    pub clocked_out: usize,
    pub shift_ended: usize,
}

impl StatusCounts {
    fn add(&mut self, status: WorkerStatus) {
        match status {
            WorkerStatus::NotStarted => self.not_started += 1,
            WorkerStatus::ClockedIn => self.clocked_in += 1,
            WorkerStatus::ClockedOut => self.clocked_out += 1,
            WorkerStatus::ShiftEnded => self.shift_ended += 1,
        }
    }
}

/// One worker's derived state as seen by a status poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerState {
    pub assignment_id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub role_code: String,
    pub status: WorkerStatus,
    pub time_entries: Vec<TimeEntry>,
    pub worked_seconds: i64,
}

impl From<&AssignedPersonnel> for WorkerState {
    fn from(a: &AssignedPersonnel) -> Self {
        Self {
            assignment_id: a.id,
            employee_id: a.employee_id,
            employee_name: a.employee_name.to_owned(),
            role_code: a.role_code.to_owned(),
            status: a.status(),
            time_entries: a.time_entries.to_owned(),
            worked_seconds: a.worked().num_seconds(),
        }
    }
}

/// A worker that keeps a shift from being finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWorker {
    pub assignment_id: Uuid,
    pub employee_name: String,
    pub status: WorkerStatus,
}

/// Shift level roll-up, computed on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSummary {
    pub shift_id: Uuid,
    pub requested_workers: u32,
    pub assigned_workers: usize,
    pub counts: StatusCounts,
    /// 0.0 to 100.0
    pub completion_percentage: f64,
    pub fully_staffed: bool,
    pub is_complete: bool,
    pub total_worked_seconds: i64,
    pub workers: Vec<WorkerState>,
}

impl ShiftSummary {
    pub fn compute(shift: &Shift, assignments: &[AssignedPersonnel]) -> Self {
        let workers = assignments.iter().map(WorkerState::from).collect::<Vec<_>>();
        let mut counts = StatusCounts::default();
        for w in workers.iter() {
            counts.add(w.status);
        }
        let assigned_workers = workers.len();
        // Every worker of an empty roster has ended, vacuously.
        let is_complete = counts.shift_ended == assigned_workers;
        let completion_percentage = if assigned_workers == 0 {
            100.
        } else {
            counts.shift_ended as f64 * 100. / assigned_workers as f64
        };
        Self {
            shift_id: shift.id,
            requested_workers: shift.requested_workers,
            assigned_workers,
            counts,
            completion_percentage,
            fully_staffed: assigned_workers >= shift.requested_workers as usize,
            is_complete,
            total_worked_seconds: workers.iter().map(|w| w.worked_seconds).sum(),
            workers,
        }
    }

    pub fn active_workers(&self) -> Vec<ActiveWorker> {
        self.workers
            .iter()
            .filter(|w| !w.status.is_terminal())
            .map(|w| ActiveWorker {
                assignment_id: w.assignment_id,
                employee_name: w.employee_name.to_owned(),
                status: w.status,
            })
            .collect()
    }

    /// Precondition of finalization.
    pub fn ensure_complete(&self) -> TimesheetResult<()> {
        if self.is_complete {
            return Ok(());
        }
        Err(TimesheetException::IncompleteShift {
            shift_id: self.shift_id,
            active_workers: self.active_workers(),
        })
    }
}
