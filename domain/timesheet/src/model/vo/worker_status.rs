use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of one worker on one shift, always derived from the time entry ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    /// No entries yet.
    NotStarted,
    /// Latest entry is open.
    ClockedIn,
    /// Latest entry is closed, worker is on a break and may clock in again.
    ClockedOut,
    /// Terminal, reached only through an explicit end shift.
    ShiftEnded,
}

impl WorkerStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ShiftEnded)
    }
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not_started",
            Self::ClockedIn => "clocked_in",
            Self::ClockedOut => "clocked_out",
            Self::ShiftEnded => "shift_ended",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockAction {
    ClockIn,
    ClockOut,
}

impl fmt::Display for ClockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClockIn => f.write_str("clock_in"),
            Self::ClockOut => f.write_str("clock_out"),
        }
    }
}

/// Result of applying end shift to a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndShiftOutcome {
    /// The worker transitioned into `shift_ended` on this call.
    Ended,
    /// The worker had already ended, nothing was written.
    AlreadyEnded,
}
