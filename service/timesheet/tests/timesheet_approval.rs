mod common;

use std::sync::{Arc, Mutex};

use common::*;
use domain_timesheet::{
    exception::{ExceptionKind, TimesheetException},
    mock::{
        MockAssignedPersonnelRepo, MockNotifier, MockShiftRepo, MockSignatureStore,
        MockTimesheetRepo,
    },
    model::{
        entity::{AssignedPersonnel, Shift, Timesheet, TimesheetStatus},
        vo::{ApprovalType, HourTotals, SignatureRef, TimesheetEvent},
    },
    service::TimesheetApprovalService,
};
use service_timesheet::TimesheetApprovalServiceImpl;
use uuid::Uuid;

struct Fixture {
    shift: Shift,
    roster: Vec<AssignedPersonnel>,
    timesheets: MockTimesheetRepo,
    signatures: MockSignatureStore,
    notifier: MockNotifier,
}

impl Fixture {
    fn new() -> Self {
        let shift = shift();
        let mut dana = worker(&shift, "Dana Reyes");
        dana.clock_in(at(9, 0)).unwrap();
        dana.clock_out(at(12, 0)).unwrap();
        dana.clock_in(at(13, 0)).unwrap();
        dana.end_shift(at(17, 0)).unwrap();
        let mut lee = worker(&shift, "Lee Park");
        lee.clock_in(at(10, 0)).unwrap();
        lee.end_shift(at(14, 30)).unwrap();
        Self {
            shift,
            roster: vec![dana, lee],
            timesheets: MockTimesheetRepo::new(),
            signatures: MockSignatureStore::new(),
            notifier: MockNotifier::new(),
        }
    }

    fn timesheet(&self, status: TimesheetStatus) -> Timesheet {
        let mut timesheet = Timesheet::finalize(
            self.shift.id,
            Uuid::new_v4(),
            HourTotals::freeze(&self.roster),
            at(17, 5),
        );
        if status != TimesheetStatus::PendingClientApproval {
            timesheet
                .approve(
                    ApprovalType::Client,
                    SignatureRef("client".to_string()),
                    Uuid::new_v4(),
                    at(17, 30),
                )
                .unwrap();
        }
        match status {
            TimesheetStatus::Completed => timesheet
                .approve(
                    ApprovalType::Manager,
                    SignatureRef("manager".to_string()),
                    Uuid::new_v4(),
                    at(18, 0),
                )
                .unwrap(),
            TimesheetStatus::Rejected => timesheet
                .reject("wrong break", Uuid::new_v4(), at(18, 0))
                .unwrap(),
            _ => {}
        }
        timesheet
    }

    fn stored(&mut self, timesheet: Timesheet) {
        self.timesheets
            .expect_get_by_id()
            .returning(move |_| Ok(Some(timesheet.clone())));
    }

    fn build(self) -> TimesheetApprovalServiceImpl {
        let shift = self.shift.clone();
        let mut shifts = MockShiftRepo::new();
        shifts
            .expect_get_by_id()
            .returning(move |_| Ok(Some(shift.clone())));
        let roster = self.roster;
        let mut assignments = MockAssignedPersonnelRepo::new();
        assignments
            .expect_get_by_shift_id()
            .returning(move |_| Ok(roster.clone()));
        TimesheetApprovalServiceImpl::builder()
            .shift_repo(Arc::new(shifts))
            .assignment_repo(Arc::new(assignments))
            .timesheet_repo(Arc::new(self.timesheets))
            .permission_service(Arc::new(allow_all()))
            .signature_store(Arc::new(self.signatures))
            .notifier(Arc::new(self.notifier))
            .time_source(ManualClock::new(at(19, 0)))
            .build()
    }
}

#[tokio::test]
async fn test_finalize_freezes_totals() {
    let mut fixture = Fixture::new();
    let shift_id = fixture.shift.id;
    let user = Uuid::new_v4();
    fixture
        .timesheets
        .expect_get_by_shift_id()
        .returning(|_| Ok(None));
    fixture
        .timesheets
        .expect_insert_for_shift()
        .times(1)
        .returning(|_| Ok(true));
    let (notifier, events) = recording_notifier();
    fixture.notifier = notifier;
    let service = fixture.build();

    let timesheet = service.finalize_timesheet(user, shift_id).await.unwrap();
    assert_eq!(timesheet.status, TimesheetStatus::PendingClientApproval);
    assert_eq!(timesheet.submitted_by, user);
    assert_eq!(timesheet.hour_totals.total_seconds, (7 * 60 + 4 * 60 + 30) * 60);
    assert_eq!(
        *events.lock().unwrap(),
        vec![TimesheetEvent::TimesheetFinalized {
            timesheet_id: timesheet.id,
            shift_id,
            submitted_by: user,
        }]
    );
}

#[tokio::test]
async fn test_finalize_incomplete_shift_creates_nothing() {
    let mut fixture = Fixture::new();
    let mut late = worker(&fixture.shift, "Still Working");
    late.clock_in(at(12, 0)).unwrap();
    fixture.roster.push(late);
    let shift_id = fixture.shift.id;
    fixture.timesheets.expect_insert_for_shift().never();
    fixture.timesheets.expect_update_with_lock().never();
    let service = fixture.build();

    match service
        .finalize_timesheet(Uuid::new_v4(), shift_id)
        .await
        .unwrap_err()
    {
        TimesheetException::IncompleteShift { active_workers, .. } => {
            assert_eq!(active_workers.len(), 1);
            assert_eq!(active_workers[0].employee_name, "Still Working");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_finalize_twice_is_invalid() {
    let mut fixture = Fixture::new();
    let shift_id = fixture.shift.id;
    let existing = fixture.timesheet(TimesheetStatus::PendingClientApproval);
    fixture
        .timesheets
        .expect_get_by_shift_id()
        .returning(move |_| Ok(Some(existing.clone())));
    fixture.timesheets.expect_update_with_lock().never();
    let service = fixture.build();

    let err = service
        .finalize_timesheet(Uuid::new_v4(), shift_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::InvalidState);
}

#[tokio::test]
async fn test_finalize_resubmits_rejected() {
    let mut fixture = Fixture::new();
    let shift_id = fixture.shift.id;
    let rejected = fixture.timesheet(TimesheetStatus::Rejected);
    let id = rejected.id;
    fixture
        .timesheets
        .expect_get_by_shift_id()
        .returning(move |_| Ok(Some(rejected.clone())));
    fixture
        .timesheets
        .expect_update_with_lock()
        .times(1)
        .withf(move |t| t.id == id && t.status == TimesheetStatus::PendingClientApproval)
        .returning(|_| Ok(true));
    fixture.notifier.expect_notify().returning(|_| Ok(()));
    let service = fixture.build();

    let timesheet = service
        .finalize_timesheet(Uuid::new_v4(), shift_id)
        .await
        .unwrap();
    assert_eq!(timesheet.id, id);
    assert_eq!(timesheet.version, 1);
    assert!(timesheet.client_signature.is_none());
    assert!(timesheet.rejection_reason.is_none());
}

#[tokio::test]
async fn test_notifier_failure_keeps_transition() {
    let mut fixture = Fixture::new();
    let shift_id = fixture.shift.id;
    fixture
        .timesheets
        .expect_get_by_shift_id()
        .returning(|_| Ok(None));
    fixture
        .timesheets
        .expect_insert_for_shift()
        .times(1)
        .returning(|_| Ok(true));
    fixture
        .notifier
        .expect_notify()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("webhook unreachable")));
    let service = fixture.build();

    let timesheet = service
        .finalize_timesheet(Uuid::new_v4(), shift_id)
        .await
        .unwrap();
    assert_eq!(timesheet.status, TimesheetStatus::PendingClientApproval);
}

#[tokio::test]
async fn test_client_approval() {
    let mut fixture = Fixture::new();
    let pending = fixture.timesheet(TimesheetStatus::PendingClientApproval);
    let id = pending.id;
    fixture.stored(pending);
    fixture
        .signatures
        .expect_put()
        .times(1)
        .withf(move |ts, kind, image| *ts == id && *kind == ApprovalType::Client && image == b"png")
        .returning(|_, _, _| Ok(SignatureRef("ref".to_string())));
    fixture
        .timesheets
        .expect_update_with_lock()
        .times(1)
        .returning(|_| Ok(true));
    let (notifier, events) = recording_notifier();
    fixture.notifier = notifier;
    let service = fixture.build();

    let user = Uuid::new_v4();
    let timesheet = service
        .approve_timesheet(user, id, ApprovalType::Client, b"png".to_vec())
        .await
        .unwrap();
    assert_eq!(timesheet.status, TimesheetStatus::PendingFinalApproval);
    assert_eq!(timesheet.client_signature, Some(SignatureRef("ref".to_string())));
    assert_eq!(timesheet.client_approved_by, Some(user));
    assert_eq!(timesheet.client_approved_at, Some(at(19, 0)));
    assert!(matches!(
        events.lock().unwrap()[0],
        TimesheetEvent::ClientApproved { .. }
    ));
}

#[tokio::test]
async fn test_manager_cannot_approve_first() {
    let mut fixture = Fixture::new();
    let pending = fixture.timesheet(TimesheetStatus::PendingClientApproval);
    let id = pending.id;
    fixture.stored(pending);
    fixture.signatures.expect_put().never();
    fixture.timesheets.expect_update_with_lock().never();
    let service = fixture.build();

    let err = service
        .approve_timesheet(Uuid::new_v4(), id, ApprovalType::Manager, b"png".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::InvalidState);
}

#[tokio::test]
async fn test_approve_requires_signature() {
    let mut fixture = Fixture::new();
    fixture.timesheets.expect_get_by_id().never();
    let service = fixture.build();

    let err = service
        .approve_timesheet(Uuid::new_v4(), Uuid::new_v4(), ApprovalType::Client, vec![])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::ValidationError);
}

#[tokio::test]
async fn test_completed_timesheet_is_terminal() {
    let mut fixture = Fixture::new();
    let completed = fixture.timesheet(TimesheetStatus::Completed);
    let id = completed.id;
    fixture.stored(completed);
    fixture.timesheets.expect_update_with_lock().never();
    let service = fixture.build();

    let err = service
        .approve_timesheet(Uuid::new_v4(), id, ApprovalType::Manager, b"png".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::TerminalState);
    let err = service
        .reject_timesheet(Uuid::new_v4(), id, "too late".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::TerminalState);
}

#[tokio::test]
async fn test_reject_with_empty_reason() {
    let mut fixture = Fixture::new();
    fixture.timesheets.expect_get_by_id().never();
    fixture.timesheets.expect_update_with_lock().never();
    let service = fixture.build();

    let err = service
        .reject_timesheet(Uuid::new_v4(), Uuid::new_v4(), "  ".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::ValidationError);
}

#[tokio::test]
async fn test_reject_retries_on_stale_version() {
    let mut fixture = Fixture::new();
    let pending = fixture.timesheet(TimesheetStatus::PendingFinalApproval);
    let id = pending.id;
    fixture.stored(pending);
    let writes = Arc::new(Mutex::new(0));
    let counter = writes.clone();
    fixture
        .timesheets
        .expect_update_with_lock()
        .times(2)
        .returning(move |_| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            Ok(*n > 1)
        });
    fixture.notifier.expect_notify().returning(|_| Ok(()));
    let service = fixture.build();

    let timesheet = service
        .reject_timesheet(Uuid::new_v4(), id, " missing worker ".to_string())
        .await
        .unwrap();
    assert_eq!(timesheet.status, TimesheetStatus::Rejected);
    assert_eq!(timesheet.rejection_reason.as_deref(), Some("missing worker"));
    assert_eq!(*writes.lock().unwrap(), 2);
}

/// The stored row as seen on the first read, then as rejected and resubmitted with a
/// shorter roster once a competing write has landed.
fn resubmitted_underneath(fixture: &mut Fixture, first: Timesheet) -> Timesheet {
    let mut resubmitted = first.clone();
    resubmitted
        .reject("missing overtime", Uuid::new_v4(), at(18, 0))
        .unwrap();
    resubmitted
        .resubmit(Uuid::new_v4(), HourTotals::freeze(&fixture.roster[..1]), at(18, 30))
        .unwrap();
    resubmitted.version = first.version + 2;
    let reads = Arc::new(Mutex::new(0));
    let later = resubmitted.clone();
    fixture.timesheets.expect_get_by_id().returning(move |_| {
        let mut n = reads.lock().unwrap();
        *n += 1;
        Ok(Some(if *n == 1 { first.clone() } else { later.clone() }))
    });
    resubmitted
}

#[tokio::test]
async fn test_approval_is_not_retried_onto_resubmission() {
    let mut fixture = Fixture::new();
    let pending = fixture.timesheet(TimesheetStatus::PendingClientApproval);
    let id = pending.id;
    let resubmitted = resubmitted_underneath(&mut fixture, pending.clone());
    assert_ne!(resubmitted.hour_totals, pending.hour_totals);
    fixture
        .signatures
        .expect_put()
        .times(1)
        .returning(|_, _, _| Ok(SignatureRef("ref".to_string())));
    fixture
        .signatures
        .expect_delete()
        .times(1)
        .withf(|r| r.as_str() == "ref")
        .returning(|_| Ok(()));
    fixture
        .timesheets
        .expect_update_with_lock()
        .times(1)
        .returning(|_| Ok(false));
    fixture.notifier.expect_notify().never();
    let service = fixture.build();

    let err = service
        .approve_timesheet(Uuid::new_v4(), id, ApprovalType::Client, b"png".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TimesheetException::ConcurrentModification { id: e, .. } if e == id
    ));
}

#[tokio::test]
async fn test_signature_of_exhausted_approval_is_discarded() {
    let mut fixture = Fixture::new();
    let pending = fixture.timesheet(TimesheetStatus::PendingFinalApproval);
    let id = pending.id;
    fixture.stored(pending);
    fixture
        .signatures
        .expect_put()
        .times(1)
        .returning(|_, _, _| Ok(SignatureRef("manager-ref".to_string())));
    fixture
        .signatures
        .expect_delete()
        .times(1)
        .withf(|r| r.as_str() == "manager-ref")
        .returning(|_| Ok(()));
    fixture
        .timesheets
        .expect_update_with_lock()
        .times(3)
        .returning(|_| Ok(false));
    fixture.notifier.expect_notify().never();
    let service = fixture.build();

    let err = service
        .approve_timesheet(Uuid::new_v4(), id, ApprovalType::Manager, b"png".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::ConcurrentModification);
}

#[tokio::test]
async fn test_rejection_is_not_retried_onto_resubmission() {
    let mut fixture = Fixture::new();
    let pending = fixture.timesheet(TimesheetStatus::PendingClientApproval);
    let id = pending.id;
    resubmitted_underneath(&mut fixture, pending);
    fixture
        .timesheets
        .expect_update_with_lock()
        .times(1)
        .returning(|_| Ok(false));
    fixture.notifier.expect_notify().never();
    let service = fixture.build();

    let err = service
        .reject_timesheet(Uuid::new_v4(), id, "hours look short".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::ConcurrentModification);
}

#[tokio::test]
async fn test_export_only_completed() {
    let mut fixture = Fixture::new();
    let pending = fixture.timesheet(TimesheetStatus::PendingFinalApproval);
    let id = pending.id;
    fixture.stored(pending);
    let service = fixture.build();
    let err = service
        .export_timesheet(Uuid::new_v4(), id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::InvalidState);

    let mut fixture = Fixture::new();
    let completed = fixture.timesheet(TimesheetStatus::Completed);
    let id = completed.id;
    fixture.stored(completed);
    let service = fixture.build();
    let csv = service.export_timesheet(Uuid::new_v4(), id).await.unwrap();
    assert!(csv.starts_with("employee,role_code,entry_number"));
    assert!(csv.trim_end().ends_with("TOTAL,,,,,11.50"));
}

#[tokio::test]
async fn test_missing_signature_is_not_found() {
    let mut fixture = Fixture::new();
    let pending = fixture.timesheet(TimesheetStatus::PendingFinalApproval);
    let id = pending.id;
    fixture.stored(pending);
    fixture
        .signatures
        .expect_get()
        .withf(|r| r.as_str() == "client")
        .returning(|_| Ok(b"png".to_vec()));
    let service = fixture.build();

    let image = service
        .get_signature(Uuid::new_v4(), id, ApprovalType::Client)
        .await
        .unwrap();
    assert_eq!(image, b"png");
    let err = service
        .get_signature(Uuid::new_v4(), id, ApprovalType::Manager)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::NotFound);
}
