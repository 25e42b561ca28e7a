use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::AssignedPersonnel;

/// Hour aggregates captured once at finalization and never recalculated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourTotals {
    pub total_seconds: i64,
    pub workers: Vec<WorkerHours>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerHours {
    pub assignment_id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub role_code: String,
    pub entries: Vec<FrozenEntry>,
    pub worked_seconds: i64,
}

/// A closed time entry as it stood at finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrozenEntry {
    pub entry_number: u8,
    pub clock_in: DateTime<Utc>,
    pub clock_out: DateTime<Utc>,
    pub worked_seconds: i64,
}

impl HourTotals {
    pub fn freeze(assignments: &[AssignedPersonnel]) -> Self {
        let workers = assignments
            .iter()
            .map(|a| WorkerHours {
                assignment_id: a.id,
                employee_id: a.employee_id,
                employee_name: a.employee_name.to_owned(),
                role_code: a.role_code.to_owned(),
                entries: a
                    .time_entries
                    .iter()
                    .filter_map(|e| match (e.clock_in, e.clock_out) {
                        (Some(clock_in), Some(clock_out)) => Some(FrozenEntry {
                            entry_number: e.entry_number,
                            clock_in,
                            clock_out,
                            worked_seconds: (clock_out - clock_in).num_seconds(),
                        }),
                        _ => None,
                    })
                    .collect(),
                worked_seconds: a.worked().num_seconds(),
            })
            .collect::<Vec<_>>();
        Self {
            total_seconds: workers.iter().map(|w| w.worked_seconds).sum(),
            workers,
        }
    }

    pub fn total_hours(&self) -> f64 {
        seconds_to_hours(self.total_seconds)
    }
}

pub fn seconds_to_hours(seconds: i64) -> f64 {
    seconds as f64 / 3600.
}
