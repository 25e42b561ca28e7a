use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TimeEntry;
use crate::{
    exception::{TimesheetException, TimesheetResult},
    model::vo::{ClockAction, EndShiftOutcome, WorkerStatus},
};

/// Maximum clock-in/clock-out segments per worker per shift.
pub const MAX_TIME_ENTRIES: usize = 3;

/// A worker assigned to a shift, owning its time entry ledger.
///
/// The status is never stored. It is recomputed from `time_entries` and `ended_at`
/// on every read, so the ledger is the single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedPersonnel {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    /// e.g. "CC" for crew chief, "GL" for general labor.
    pub role_code: String,
    /// Ordered by `entry_number`, contiguous from 1.
    pub time_entries: Vec<TimeEntry>,
    /// When the explicit end shift action happened.
    pub ended_at: Option<DateTime<Utc>>,
    /// Optimistic lock counter.
    pub version: i64,
}

impl AssignedPersonnel {
    pub fn status(&self) -> WorkerStatus {
        if self.ended_at.is_some() {
            return WorkerStatus::ShiftEnded;
        }
        match self.time_entries.last() {
            None => WorkerStatus::NotStarted,
            Some(entry) if entry.is_open() => WorkerStatus::ClockedIn,
            Some(_) => WorkerStatus::ClockedOut,
        }
    }

    pub fn open_entry(&self) -> Option<&TimeEntry> {
        self.time_entries.iter().find(|e| e.is_open())
    }

    /// Sum of closed entries. An open entry contributes nothing until it is closed.
    pub fn worked(&self) -> Duration {
        self.time_entries
            .iter()
            .filter_map(TimeEntry::worked)
            .fold(Duration::zero(), |acc, d| acc + d)
    }

    pub fn apply(&mut self, action: ClockAction, now: DateTime<Utc>) -> TimesheetResult<()> {
        match action {
            ClockAction::ClockIn => self.clock_in(now),
            ClockAction::ClockOut => self.clock_out(now),
        }
    }

    pub fn clock_in(&mut self, now: DateTime<Utc>) -> TimesheetResult<()> {
        self.ensure_not_ended()?;
        if self.open_entry().is_some() {
            return Err(TimesheetException::invalid_state(format!(
                "{} is already clocked in",
                self.employee_name
            )));
        }
        if self.time_entries.len() >= MAX_TIME_ENTRIES {
            return Err(TimesheetException::invalid_state(format!(
                "{} has used all {MAX_TIME_ENTRIES} time entries",
                self.employee_name
            )));
        }
        let entry_number = self.time_entries.len() as u8 + 1;
        self.time_entries.push(TimeEntry::open(self.id, entry_number, now));
        Ok(())
    }

    pub fn clock_out(&mut self, now: DateTime<Utc>) -> TimesheetResult<()> {
        self.ensure_not_ended()?;
        if !self.close_open_entry(now) {
            return Err(TimesheetException::invalid_state(format!(
                "{} is not clocked in",
                self.employee_name
            )));
        }
        Ok(())
    }

    /// Ends the worker's shift, force-closing any open entry at `now`.
    ///
    /// A worker who never clocked in ends with an empty ledger and zero hours.
    pub fn end_shift(&mut self, now: DateTime<Utc>) -> TimesheetResult<EndShiftOutcome> {
        match self.status() {
            WorkerStatus::ShiftEnded => Ok(EndShiftOutcome::AlreadyEnded),
            WorkerStatus::NotStarted | WorkerStatus::ClockedIn | WorkerStatus::ClockedOut => {
                self.close_open_entry(now);
                self.ended_at = Some(now);
                Ok(EndShiftOutcome::Ended)
            }
        }
    }

    fn close_open_entry(&mut self, now: DateTime<Utc>) -> bool {
        match self.time_entries.iter_mut().find(|e| e.is_open()) {
            Some(entry) => {
                // A server clock that stepped backwards must not produce a negative segment.
                let clock_in = entry.clock_in.unwrap_or(now);
                entry.clock_out = Some(now.max(clock_in));
                true
            }
            None => false,
        }
    }

    fn ensure_not_ended(&self) -> TimesheetResult<()> {
        if self.status().is_terminal() {
            return Err(TimesheetException::TerminalState {
                entity: "Assigned personnel",
                id: self.id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::exception::ExceptionKind;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 3, hour, min, 0).unwrap()
    }

    fn worker() -> AssignedPersonnel {
        AssignedPersonnel {
            id: Uuid::new_v4(),
            shift_id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            employee_name: "Dana Reyes".to_string(),
            role_code: "GL".to_string(),
            time_entries: vec![],
            ended_at: None,
            version: 0,
        }
    }

    #[test]
    fn test_status_follows_ledger() {
        let mut w = worker();
        assert_eq!(w.status(), WorkerStatus::NotStarted);
        w.clock_in(at(9, 0)).unwrap();
        assert_eq!(w.status(), WorkerStatus::ClockedIn);
        w.clock_out(at(12, 0)).unwrap();
        assert_eq!(w.status(), WorkerStatus::ClockedOut);
        w.end_shift(at(12, 5)).unwrap();
        assert_eq!(w.status(), WorkerStatus::ShiftEnded);
    }

    #[test]
    fn test_in_out_in_gives_two_entries() {
        let mut w = worker();
        w.clock_in(at(9, 0)).unwrap();
        w.clock_out(at(12, 0)).unwrap();
        w.clock_in(at(13, 0)).unwrap();
        assert_eq!(w.time_entries.len(), 2);
        assert_eq!(
            w.time_entries.iter().map(|e| e.entry_number).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(w.time_entries[1].is_open());
    }

    #[test]
    fn test_fourth_clock_in_is_rejected() {
        let mut w = worker();
        for (start, end) in [(8, 10), (11, 12), (13, 15)] {
            w.clock_in(at(start, 0)).unwrap();
            w.clock_out(at(end, 0)).unwrap();
        }
        let err = w.clock_in(at(16, 0)).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::InvalidState);
        assert_eq!(w.time_entries.len(), MAX_TIME_ENTRIES);
    }

    #[test]
    fn test_double_clock_in_is_rejected() {
        let mut w = worker();
        w.clock_in(at(9, 0)).unwrap();
        let err = w.clock_in(at(9, 1)).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::InvalidState);
        assert_eq!(w.time_entries.len(), 1);
    }

    #[test]
    fn test_clock_out_without_open_entry_is_rejected() {
        let mut w = worker();
        assert_eq!(
            w.clock_out(at(9, 0)).unwrap_err().kind(),
            ExceptionKind::InvalidState
        );
        w.clock_in(at(9, 0)).unwrap();
        w.clock_out(at(10, 0)).unwrap();
        assert_eq!(
            w.clock_out(at(10, 1)).unwrap_err().kind(),
            ExceptionKind::InvalidState
        );
    }

    #[test]
    fn test_end_shift_is_idempotent() {
        let mut w = worker();
        w.clock_in(at(9, 0)).unwrap();
        assert_eq!(w.end_shift(at(17, 0)).unwrap(), EndShiftOutcome::Ended);
        assert_eq!(w.end_shift(at(17, 30)).unwrap(), EndShiftOutcome::AlreadyEnded);
        assert_eq!(w.status(), WorkerStatus::ShiftEnded);
        assert_eq!(w.ended_at, Some(at(17, 0)));
    }

    #[test]
    fn test_actions_after_end_are_terminal() {
        let mut w = worker();
        w.clock_in(at(9, 0)).unwrap();
        w.end_shift(at(17, 0)).unwrap();
        assert_eq!(
            w.clock_in(at(18, 0)).unwrap_err().kind(),
            ExceptionKind::TerminalState
        );
        assert_eq!(
            w.clock_out(at(18, 0)).unwrap_err().kind(),
            ExceptionKind::TerminalState
        );
    }

    #[test]
    fn test_no_show_ends_with_zero_hours() {
        let mut w = worker();
        assert_eq!(w.end_shift(at(17, 0)).unwrap(), EndShiftOutcome::Ended);
        assert_eq!(w.status(), WorkerStatus::ShiftEnded);
        assert!(w.time_entries.is_empty());
        assert_eq!(w.worked(), Duration::zero());
        assert_eq!(
            w.clock_in(at(17, 5)).unwrap_err().kind(),
            ExceptionKind::TerminalState
        );
    }

    #[test]
    fn test_end_shift_closes_open_entry() {
        let mut w = worker();
        w.clock_in(at(9, 0)).unwrap();
        w.clock_out(at(12, 0)).unwrap();
        w.clock_in(at(13, 0)).unwrap();
        w.end_shift(at(17, 0)).unwrap();
        assert!(w.open_entry().is_none());
        assert_eq!(w.time_entries[1].clock_out, Some(at(17, 0)));
        assert_eq!(w.worked(), Duration::hours(7));
    }

    #[test]
    fn test_open_entry_does_not_count() {
        let mut w = worker();
        w.clock_in(at(9, 0)).unwrap();
        w.clock_out(at(11, 30)).unwrap();
        w.clock_in(at(12, 0)).unwrap();
        assert_eq!(w.worked(), Duration::minutes(150));
    }

    #[test]
    fn test_clock_out_never_precedes_clock_in() {
        let mut w = worker();
        w.clock_in(at(9, 0)).unwrap();
        w.clock_out(at(8, 59)).unwrap();
        assert_eq!(w.time_entries[0].clock_out, Some(at(9, 0)));
        assert_eq!(w.worked(), Duration::zero());
    }
}
