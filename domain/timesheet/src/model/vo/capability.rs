use std::fmt;

use serde::{Deserialize, Serialize};

/// Everything the permission gate can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Clock a worker in or out.
    ClockWorker,
    /// End one or all workers' shifts.
    EndShift,
    /// Turn a completed shift into a timesheet.
    FinalizeTimesheet,
    /// Sign or reject at the client stage.
    ClientReview,
    /// Sign or reject at the final (manager) stage.
    ManagerReview,
    /// Read shift status.
    ViewShift,
    /// Read or export a timesheet.
    ViewTimesheet,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ClockWorker => "clock workers",
            Self::EndShift => "end shifts",
            Self::FinalizeTimesheet => "finalize timesheets",
            Self::ClientReview => "review timesheets as client",
            Self::ManagerReview => "review timesheets as manager",
            Self::ViewShift => "view shifts",
            Self::ViewTimesheet => "view timesheets",
        };
        f.write_str(s)
    }
}
