use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::vo::{ActiveWorker, Capability};

pub type TimesheetResult<T> = Result<T, TimesheetException>;

#[derive(Error, Debug)]
pub enum TimesheetException {
    #[error("Action is not legal in the current state: {reason}")]
    InvalidState { reason: String },

    #[error("{entity} with id: {id} is in a terminal state, no further actions are allowed.")]
    TerminalState { entity: &'static str, id: Uuid },

    #[error("Shift: {shift_id} still has active workers: {}.", names(.active_workers))]
    IncompleteShift {
        shift_id: Uuid,
        active_workers: Vec<ActiveWorker>,
    },

    #[error("Invalid {field}: {reason}")]
    ValidationError { field: &'static str, reason: String },

    #[error("User: {user_id} is not allowed to {action}.")]
    PermissionDenied { user_id: Uuid, action: Capability },

    #[error("There is no {entity} with id: {id}.")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} with id: {id} was modified concurrently, refresh and retry.")]
    ConcurrentModification { entity: &'static str, id: Uuid },

    #[error("Timesheet internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

/// Coarse classification of [`TimesheetException`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKind {
    InvalidState,
    TerminalState,
    IncompleteShift,
    ValidationError,
    PermissionDenied,
    NotFound,
    ConcurrentModification,
    InternalError,
}

impl TimesheetException {
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ExceptionKind {
        match self {
            Self::InvalidState { .. } => ExceptionKind::InvalidState,
            Self::TerminalState { .. } => ExceptionKind::TerminalState,
            Self::IncompleteShift { .. } => ExceptionKind::IncompleteShift,
            Self::ValidationError { .. } => ExceptionKind::ValidationError,
            Self::PermissionDenied { .. } => ExceptionKind::PermissionDenied,
            Self::NotFound { .. } => ExceptionKind::NotFound,
            Self::ConcurrentModification { .. } => ExceptionKind::ConcurrentModification,
            Self::InternalError { .. } => ExceptionKind::InternalError,
        }
    }

    /// Whether the caller may succeed by refreshing state or supplying input and retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ExceptionKind::InvalidState
                | ExceptionKind::IncompleteShift
                | ExceptionKind::ValidationError
                | ExceptionKind::ConcurrentModification
        )
    }
}

impl From<anyhow::Error> for TimesheetException {
    fn from(e: anyhow::Error) -> Self {
        TimesheetException::InternalError { source: e }
    }
}

fn names(workers: &[ActiveWorker]) -> String {
    workers
        .iter()
        .map(|w| format!("{} ({})", w.employee_name, w.status))
        .collect::<Vec<_>>()
        .join(", ")
}
