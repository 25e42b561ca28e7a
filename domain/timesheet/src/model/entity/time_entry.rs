use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One clock-in/clock-out segment of a worker on a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: Uuid,
    /// Owning assignment.
    pub assignment_id: Uuid,
    /// 1-based position in the assignment's ledger.
    pub entry_number: u8,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
}

impl TimeEntry {
    pub fn open(assignment_id: Uuid, entry_number: u8, clock_in: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            assignment_id,
            entry_number,
            clock_in: Some(clock_in),
            clock_out: None,
        }
    }

    /// Clocked in and not yet clocked out.
    pub fn is_open(&self) -> bool {
        self.clock_in.is_some() && self.clock_out.is_none()
    }

    /// Worked time of a closed entry; open entries count for nothing.
    pub fn worked(&self) -> Option<Duration> {
        match (self.clock_in, self.clock_out) {
            (Some(clock_in), Some(clock_out)) => Some(clock_out - clock_in),
            _ => None,
        }
    }
}
