#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use domain_timesheet::{
    mock::{MockAssignedPersonnelRepo, MockNotifier, MockPermissionService},
    model::{
        entity::{AssignedPersonnel, Role, Shift, UserAccess},
        vo::TimesheetEvent,
    },
    service::TimeSource,
};
use uuid::Uuid;

pub fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 3, hour, min, 0).unwrap()
}

/// Clock the test moves by hand.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(now)))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().unwrap() = now;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn shift() -> Shift {
    Shift {
        id: Uuid::new_v4(),
        client_company_id: Uuid::new_v4(),
        job_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        requested_workers: 2,
        location: Some("Hall B".to_string()),
    }
}

pub fn worker(shift: &Shift, name: &str) -> AssignedPersonnel {
    AssignedPersonnel {
        id: Uuid::new_v4(),
        shift_id: shift.id,
        employee_id: Uuid::new_v4(),
        employee_name: name.to_string(),
        role_code: "GL".to_string(),
        time_entries: vec![],
        ended_at: None,
        version: 0,
    }
}

pub fn access(role: Role) -> UserAccess {
    UserAccess {
        user_id: Uuid::new_v4(),
        name: format!("{role:?}"),
        role,
        company_id: None,
        grants: vec![],
    }
}

pub fn allow_all() -> MockPermissionService {
    let mut permission = MockPermissionService::new();
    permission
        .expect_authorize()
        .returning(|_, _, _| Ok(access(Role::Manager)));
    permission
}

/// Notifier that records every event it is handed.
pub fn recording_notifier() -> (MockNotifier, Arc<Mutex<Vec<TimesheetEvent>>>) {
    let events = Arc::new(Mutex::new(vec![]));
    let sink = events.clone();
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().returning(move |e| {
        sink.lock().unwrap().push(e);
        Ok(())
    });
    (notifier, events)
}

/// Assignment repository over a single row that honours version checks.
pub fn versioned_assignment_repo(
    row: Arc<Mutex<AssignedPersonnel>>,
) -> MockAssignedPersonnelRepo {
    let mut repo = MockAssignedPersonnelRepo::new();
    let read = row.clone();
    repo.expect_get_by_id()
        .returning(move |_| Ok(Some(read.lock().unwrap().clone())));
    let write = row;
    repo.expect_update_with_lock().returning(move |entity| {
        let mut stored = write.lock().unwrap();
        if stored.version != entity.version {
            return Ok(false);
        }
        *stored = AssignedPersonnel {
            version: entity.version + 1,
            ..entity.clone()
        };
        Ok(true)
    });
    repo
}
