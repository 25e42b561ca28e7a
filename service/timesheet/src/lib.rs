mod clock;
mod export;
mod notify;
mod permission;
mod shift_status;
mod time_source;
mod timesheet_approval;

#[rustfmt::skip]
pub use {
    clock::ClockServiceImpl,
    export::render_csv,
    permission::PermissionServiceImpl,
    shift_status::ShiftStatusServiceImpl,
    time_source::SystemTimeSource,
    timesheet_approval::TimesheetApprovalServiceImpl,
};

/// Attempts per versioned write before a conflict is reported to the caller.
pub const DEFAULT_MAX_WRITE_ATTEMPTS: usize = 3;
