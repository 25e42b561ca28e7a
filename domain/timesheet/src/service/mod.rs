mod clock;
mod notifier;
mod permission;
mod shift_status;
mod signature_store;
mod time_source;
mod timesheet_approval;

#[rustfmt::skip]
pub use {
    clock::ClockService,
    notifier::Notifier,
    permission::PermissionService,
    shift_status::ShiftStatusService,
    signature_store::SignatureStore,
    time_source::TimeSource,
    timesheet_approval::TimesheetApprovalService,
};
