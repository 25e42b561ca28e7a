use base64::{engine::general_purpose, Engine};
use domain_timesheet::{
    exception::TimesheetException,
    model::{
        entity::{Timesheet, TimesheetStatus},
        vo::{ApprovalType, ClockAction},
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClockActionDto {
    pub action: ClockAction,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApproveTimesheetDto {
    pub approval_type: ApprovalType,
    /// Base64 image, optionally as a `data:image/png;base64,` URL.
    #[serde(default)]
    pub signature: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RejectTimesheetDto {
    #[serde(default)]
    pub reason: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetStateDto {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub status: TimesheetStatus,
    pub version: i64,
}

impl From<Timesheet> for TimesheetStateDto {
    fn from(t: Timesheet) -> Self {
        Self {
            id: t.id,
            shift_id: t.shift_id,
            status: t.status,
            version: t.version,
        }
    }
}

/// Decodes the signature payload. An empty payload decodes to no bytes and is
/// refused by the approval itself.
pub fn decode_signature(signature: &str) -> Result<Vec<u8>, TimesheetException> {
    let encoded = match signature.trim() {
        s if s.starts_with("data:") => match s.split_once(";base64,") {
            Some((_, data)) => data,
            None => {
                return Err(TimesheetException::validation(
                    "signature",
                    "data URL is not base64 encoded",
                ))
            }
        },
        s => s,
    };
    general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| TimesheetException::validation("signature", e.to_string()))
}
