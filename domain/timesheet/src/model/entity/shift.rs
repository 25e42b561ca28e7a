use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled shift. Its roster lives in the assigned personnel ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: Uuid,
    /// Company of the client the shift is worked for.
    pub client_company_id: Uuid,
    pub job_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub requested_workers: u32,
    #[serde(default)]
    pub location: Option<String>,
}
