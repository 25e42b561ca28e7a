use actix_web::{
    get,
    web::{self, Path},
};
use domain_timesheet::{model::vo::ShiftSummary, service::ShiftStatusService};

use super::{
    auth::UserInfo,
    extract_uuid,
    response::{ApiResponder, ApiResult},
};

#[get("/shifts/{id}/status")]
pub async fn get_shift_status(
    service: web::Data<dyn ShiftStatusService>,
    user: UserInfo,
    id: Path<String>,
) -> ApiResult<ShiftSummary> {
    let id = extract_uuid(&id)?;
    let summary = service.get_shift_status(user.id, id).await?;
    Ok(ApiResponder(summary))
}
