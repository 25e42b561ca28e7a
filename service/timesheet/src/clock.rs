use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_timesheet::{
    exception::{TimesheetException, TimesheetResult},
    model::{
        entity::{AssignedPersonnel, Shift},
        vo::{
            BulkEndShiftReport, Capability, ClockAction, EndShiftOutcome, TimesheetEvent,
            WorkerFailure, WorkerSnapshot,
        },
    },
    repository::{AssignedPersonnelRepo, ShiftRepo},
    service::{ClockService, Notifier, PermissionService, TimeSource},
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{notify::publish, DEFAULT_MAX_WRITE_ATTEMPTS};

#[derive(TypedBuilder)]
pub struct ClockServiceImpl {
    shift_repo: Arc<dyn ShiftRepo>,
    assignment_repo: Arc<dyn AssignedPersonnelRepo>,
    permission_service: Arc<dyn PermissionService>,
    notifier: Arc<dyn Notifier>,
    time_source: Arc<dyn TimeSource>,
    #[builder(default = DEFAULT_MAX_WRITE_ATTEMPTS)]
    max_write_attempts: usize,
}

#[async_trait]
impl ClockService for ClockServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn clock_action(
        &self,
        user_id: Uuid,
        assignment_id: Uuid,
        action: ClockAction,
    ) -> TimesheetResult<WorkerSnapshot> {
        let assignment = self.get_assignment(assignment_id).await?;
        let shift = self.get_shift(assignment.shift_id).await?;
        self.permission_service
            .authorize(user_id, &shift, Capability::ClockWorker)
            .await?;
        let assignment = self
            .save_with_retry(assignment, |a, now| a.apply(action, now).map(|_| true))
            .await?;
        tracing::info!(
            "{} {action} on shift: {}, entries: {}",
            assignment.employee_name,
            shift.id,
            assignment.time_entries.len()
        );
        Ok(WorkerSnapshot::from(&assignment))
    }

    #[tracing::instrument(skip(self))]
    async fn end_shift(
        &self,
        user_id: Uuid,
        assignment_id: Uuid,
    ) -> TimesheetResult<WorkerSnapshot> {
        let assignment = self.get_assignment(assignment_id).await?;
        let shift = self.get_shift(assignment.shift_id).await?;
        self.permission_service
            .authorize(user_id, &shift, Capability::EndShift)
            .await?;
        let assignment = self.end_one(assignment).await?;
        Ok(WorkerSnapshot::from(&assignment))
    }

    #[tracing::instrument(skip(self))]
    async fn end_all_shifts(
        &self,
        user_id: Uuid,
        shift_id: Uuid,
    ) -> TimesheetResult<BulkEndShiftReport> {
        let shift = self.get_shift(shift_id).await?;
        self.permission_service
            .authorize(user_id, &shift, Capability::EndShift)
            .await?;
        let roster = self.assignment_repo.get_by_shift_id(shift_id).await?;

        let mut report = BulkEndShiftReport {
            shift_id,
            ..Default::default()
        };
        let mut transitioned = false;
        for assignment in roster {
            if assignment.status().is_terminal() {
                report.ended.push(WorkerSnapshot::from(&assignment));
                continue;
            }
            let (id, name) = (assignment.id, assignment.employee_name.to_owned());
            match self.end_one(assignment).await {
                Ok(ended) => {
                    transitioned = true;
                    report.ended.push(WorkerSnapshot::from(&ended));
                }
                Err(e) => {
                    tracing::warn!("Could not end shift of {name}: {e}");
                    report.failures.push(WorkerFailure::new(id, &name, &e));
                }
            }
        }

        if transitioned && report.is_fully_successful() {
            publish(self.notifier.as_ref(), TimesheetEvent::ShiftEnded { shift_id }).await;
        }
        tracing::info!(
            "Ended shift: {shift_id}, ended: {}, failed: {}",
            report.ended.len(),
            report.failures.len()
        );
        Ok(report)
    }
}

impl ClockServiceImpl {
    async fn get_shift(&self, id: Uuid) -> TimesheetResult<Shift> {
        self.shift_repo
            .get_by_id(id)
            .await?
            .ok_or(TimesheetException::NotFound { entity: "Shift", id })
    }

    async fn get_assignment(&self, id: Uuid) -> TimesheetResult<AssignedPersonnel> {
        self.assignment_repo
            .get_by_id(id)
            .await?
            .ok_or(TimesheetException::NotFound {
                entity: "Assigned personnel",
                id,
            })
    }

    async fn end_one(&self, assignment: AssignedPersonnel) -> TimesheetResult<AssignedPersonnel> {
        self.save_with_retry(assignment, |a, now| {
            a.end_shift(now)
                .map(|outcome| outcome == EndShiftOutcome::Ended)
        })
        .await
    }

    /// Applies `mutate` and persists the result against the version it was read at.
    ///
    /// `mutate` returns whether anything changed; nothing is written otherwise. A stale
    /// write reloads the assignment and runs `mutate` again on the fresh state, so a
    /// transition that a concurrent writer already made fails validation instead of
    /// being applied twice.
    async fn save_with_retry<F>(
        &self,
        mut assignment: AssignedPersonnel,
        mutate: F,
    ) -> TimesheetResult<AssignedPersonnel>
    where
        F: Fn(&mut AssignedPersonnel, DateTime<Utc>) -> TimesheetResult<bool> + Send + Sync,
    {
        let id = assignment.id;
        let attempts = self.max_write_attempts.max(1);
        for attempt in 1..=attempts {
            if !mutate(&mut assignment, self.time_source.now())? {
                return Ok(assignment);
            }
            if self.assignment_repo.update_with_lock(&assignment).await? {
                assignment.version += 1;
                return Ok(assignment);
            }
            tracing::debug!("Stale version of assignment: {id} on attempt {attempt}/{attempts}");
            if attempt < attempts {
                assignment = self.get_assignment(id).await?;
            }
        }
        Err(TimesheetException::ConcurrentModification {
            entity: "Assigned personnel",
            id,
        })
    }
}
