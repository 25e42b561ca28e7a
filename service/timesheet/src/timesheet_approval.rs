use std::sync::Arc;

use async_trait::async_trait;
use domain_timesheet::{
    exception::{TimesheetException, TimesheetResult},
    model::{
        entity::{Shift, Timesheet},
        vo::{ApprovalType, Capability, HourTotals, ShiftSummary, SignatureRef, TimesheetEvent},
    },
    repository::{AssignedPersonnelRepo, ShiftRepo, TimesheetRepo},
    service::{Notifier, PermissionService, SignatureStore, TimeSource, TimesheetApprovalService},
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{export::render_csv, notify::publish, DEFAULT_MAX_WRITE_ATTEMPTS};

#[derive(TypedBuilder)]
pub struct TimesheetApprovalServiceImpl {
    shift_repo: Arc<dyn ShiftRepo>,
    assignment_repo: Arc<dyn AssignedPersonnelRepo>,
    timesheet_repo: Arc<dyn TimesheetRepo>,
    permission_service: Arc<dyn PermissionService>,
    signature_store: Arc<dyn SignatureStore>,
    notifier: Arc<dyn Notifier>,
    time_source: Arc<dyn TimeSource>,
    #[builder(default = DEFAULT_MAX_WRITE_ATTEMPTS)]
    max_write_attempts: usize,
}

#[async_trait]
impl TimesheetApprovalService for TimesheetApprovalServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn finalize_timesheet(
        &self,
        user_id: Uuid,
        shift_id: Uuid,
    ) -> TimesheetResult<Timesheet> {
        let shift = self.get_shift(shift_id).await?;
        self.permission_service
            .authorize(user_id, &shift, Capability::FinalizeTimesheet)
            .await?;

        for attempt in 1..=self.attempts() {
            let roster = self.assignment_repo.get_by_shift_id(shift_id).await?;
            ShiftSummary::compute(&shift, &roster).ensure_complete()?;
            let totals = HourTotals::freeze(&roster);
            let now = self.time_source.now();

            let written = match self.timesheet_repo.get_by_shift_id(shift_id).await? {
                None => {
                    let timesheet = Timesheet::finalize(shift_id, user_id, totals, now);
                    self.timesheet_repo
                        .insert_for_shift(&timesheet)
                        .await?
                        .then_some(timesheet)
                }
                Some(mut timesheet) => {
                    timesheet.resubmit(user_id, totals, now)?;
                    self.timesheet_repo
                        .update_with_lock(&timesheet)
                        .await?
                        .then(|| {
                            timesheet.version += 1;
                            timesheet
                        })
                }
            };
            if let Some(timesheet) = written {
                tracing::info!(
                    "Finalized shift: {shift_id} as timesheet: {}, total hours: {:.2}",
                    timesheet.id,
                    timesheet.hour_totals.total_hours()
                );
                publish(
                    self.notifier.as_ref(),
                    TimesheetEvent::TimesheetFinalized {
                        timesheet_id: timesheet.id,
                        shift_id,
                        submitted_by: user_id,
                    },
                )
                .await;
                return Ok(timesheet);
            }
            tracing::debug!("Timesheet of shift: {shift_id} changed underneath, attempt {attempt}");
        }
        Err(TimesheetException::ConcurrentModification {
            entity: "Timesheet of shift",
            id: shift_id,
        })
    }

    #[tracing::instrument(skip(self, signature))]
    async fn approve_timesheet(
        &self,
        user_id: Uuid,
        timesheet_id: Uuid,
        approval_type: ApprovalType,
        signature: Vec<u8>,
    ) -> TimesheetResult<Timesheet> {
        if signature.is_empty() {
            return Err(TimesheetException::validation(
                "signature",
                "a signature image is required",
            ));
        }
        let timesheet = self.get_timesheet_by_id(timesheet_id).await?;
        let shift = self.get_shift(timesheet.shift_id).await?;
        timesheet.ensure_can_approve(approval_type)?;
        self.permission_service
            .authorize(user_id, &shift, approval_type.capability())
            .await?;
        let signature = self
            .signature_store
            .put(timesheet_id, approval_type, &signature)
            .await?;

        let timesheet = match self
            .write_approval(timesheet, approval_type, &signature, user_id)
            .await
        {
            Ok(x) => x,
            Err(e) => {
                self.discard_signature(timesheet_id, approval_type, &signature)
                    .await;
                return Err(e);
            }
        };
        tracing::info!("Timesheet: {timesheet_id} {approval_type} approved, now {}", timesheet.status);
        let event = match approval_type {
            ApprovalType::Client => TimesheetEvent::ClientApproved {
                timesheet_id,
                shift_id: shift.id,
                approved_by: user_id,
            },
            ApprovalType::Manager => TimesheetEvent::TimesheetCompleted {
                timesheet_id,
                shift_id: shift.id,
                approved_by: user_id,
            },
        };
        publish(self.notifier.as_ref(), event).await;
        Ok(timesheet)
    }

    #[tracing::instrument(skip(self))]
    async fn reject_timesheet(
        &self,
        user_id: Uuid,
        timesheet_id: Uuid,
        reason: String,
    ) -> TimesheetResult<Timesheet> {
        let reason = Timesheet::validate_reason(&reason)?;
        let mut timesheet = self.get_timesheet_by_id(timesheet_id).await?;
        let shift = self.get_shift(timesheet.shift_id).await?;
        let mut authorized_for = None;

        let attempts = self.attempts();
        for attempt in 1..=attempts {
            // The stage decides who may reject, and it can move between attempts.
            let needed = timesheet.review_capability()?;
            if authorized_for != Some(needed) {
                self.permission_service
                    .authorize(user_id, &shift, needed)
                    .await?;
                authorized_for = Some(needed);
            }
            timesheet.reject(&reason, user_id, self.time_source.now())?;
            if self.timesheet_repo.update_with_lock(&timesheet).await? {
                timesheet.version += 1;
                tracing::info!("Timesheet: {timesheet_id} rejected: {reason}");
                publish(
                    self.notifier.as_ref(),
                    TimesheetEvent::TimesheetRejected {
                        timesheet_id,
                        shift_id: shift.id,
                        rejected_by: user_id,
                        reason,
                    },
                )
                .await;
                return Ok(timesheet);
            }
            tracing::debug!("Stale version of timesheet: {timesheet_id} on attempt {attempt}/{attempts}");
            if attempt < attempts {
                timesheet = self.reload_submission(&timesheet).await?;
            }
        }
        Err(TimesheetException::ConcurrentModification {
            entity: "Timesheet",
            id: timesheet_id,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn get_timesheet(&self, user_id: Uuid, timesheet_id: Uuid) -> TimesheetResult<Timesheet> {
        self.get_viewable(user_id, timesheet_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_signature(
        &self,
        user_id: Uuid,
        timesheet_id: Uuid,
        kind: ApprovalType,
    ) -> TimesheetResult<Vec<u8>> {
        let timesheet = self.get_viewable(user_id, timesheet_id).await?;
        let reference = timesheet
            .signature(kind)
            .ok_or(TimesheetException::NotFound {
                entity: match kind {
                    ApprovalType::Client => "Client signature of timesheet",
                    ApprovalType::Manager => "Manager signature of timesheet",
                },
                id: timesheet_id,
            })?;
        Ok(self.signature_store.get(reference).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn export_timesheet(&self, user_id: Uuid, timesheet_id: Uuid) -> TimesheetResult<String> {
        let timesheet = self.get_viewable(user_id, timesheet_id).await?;
        timesheet.ensure_exportable()?;
        Ok(render_csv(&timesheet)?)
    }
}

impl TimesheetApprovalServiceImpl {
    fn attempts(&self) -> usize {
        self.max_write_attempts.max(1)
    }

    async fn get_shift(&self, id: Uuid) -> TimesheetResult<Shift> {
        self.shift_repo
            .get_by_id(id)
            .await?
            .ok_or(TimesheetException::NotFound { entity: "Shift", id })
    }

    async fn get_timesheet_by_id(&self, id: Uuid) -> TimesheetResult<Timesheet> {
        self.timesheet_repo
            .get_by_id(id)
            .await?
            .ok_or(TimesheetException::NotFound {
                entity: "Timesheet",
                id,
            })
    }

    /// Reloads a timesheet after a stale write. A review is only retried against the
    /// submission it was made on.
    async fn reload_submission(&self, seen: &Timesheet) -> TimesheetResult<Timesheet> {
        let fresh = self.get_timesheet_by_id(seen.id).await?;
        if !fresh.same_submission(seen) {
            tracing::debug!("Timesheet: {} was resubmitted underneath", seen.id);
            return Err(TimesheetException::ConcurrentModification {
                entity: "Timesheet",
                id: seen.id,
            });
        }
        Ok(fresh)
    }

    async fn write_approval(
        &self,
        mut timesheet: Timesheet,
        approval_type: ApprovalType,
        signature: &SignatureRef,
        user_id: Uuid,
    ) -> TimesheetResult<Timesheet> {
        let id = timesheet.id;
        let attempts = self.attempts();
        for attempt in 1..=attempts {
            timesheet.approve(
                approval_type,
                signature.clone(),
                user_id,
                self.time_source.now(),
            )?;
            if self.timesheet_repo.update_with_lock(&timesheet).await? {
                timesheet.version += 1;
                return Ok(timesheet);
            }
            tracing::debug!("Stale version of timesheet: {id} on attempt {attempt}/{attempts}");
            if attempt < attempts {
                timesheet = self.reload_submission(&timesheet).await?;
            }
        }
        Err(TimesheetException::ConcurrentModification {
            entity: "Timesheet",
            id,
        })
    }

    /// Drops a stored image that no approval ended up referencing.
    async fn discard_signature(
        &self,
        timesheet_id: Uuid,
        kind: ApprovalType,
        signature: &SignatureRef,
    ) {
        let referenced = match self.timesheet_repo.get_by_id(timesheet_id).await {
            Ok(Some(t)) => t.signature(kind) == Some(signature),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Keeping signature: {signature}, timesheet unreadable: {e}");
                return;
            }
        };
        if referenced {
            return;
        }
        if let Err(e) = self.signature_store.delete(signature).await {
            tracing::warn!("Could not discard signature: {signature}: {e}");
        }
    }

    async fn get_viewable(&self, user_id: Uuid, timesheet_id: Uuid) -> TimesheetResult<Timesheet> {
        let timesheet = self.get_timesheet_by_id(timesheet_id).await?;
        let shift = self.get_shift(timesheet.shift_id).await?;
        self.permission_service
            .authorize(user_id, &shift, Capability::ViewTimesheet)
            .await?;
        Ok(timesheet)
    }
}
