pub mod capability;
pub mod event;
pub mod hour_totals;
pub mod roster;
pub mod shift_summary;
pub mod signature;
pub mod worker_status;

#[rustfmt::skip]
pub use {
    capability::Capability,
    event::TimesheetEvent,
    hour_totals::{FrozenEntry, HourTotals, WorkerHours},
    roster::{BulkEndShiftReport, WorkerFailure, WorkerSnapshot},
    shift_summary::{ActiveWorker, ShiftSummary, StatusCounts, WorkerState},
    signature::{ApprovalType, SignatureRef},
    worker_status::{ClockAction, EndShiftOutcome, WorkerStatus},
};
