use actix_web::{
    post,
    web::{self, Path},
};
use domain_timesheet::{
    model::vo::{BulkEndShiftReport, WorkerSnapshot},
    service::ClockService,
};

use super::{
    auth::UserInfo,
    dtos::ClockActionDto,
    extract_uuid,
    response::{ApiResponder, ApiResult},
};

#[post("/assignments/{id}/clock")]
pub async fn clock_action(
    service: web::Data<dyn ClockService>,
    user: UserInfo,
    id: Path<String>,
    body: web::Json<ClockActionDto>,
) -> ApiResult<WorkerSnapshot> {
    let id = extract_uuid(&id)?;
    let worker = service.clock_action(user.id, id, body.action).await?;
    Ok(ApiResponder(worker))
}

#[post("/assignments/{id}/end-shift")]
pub async fn end_shift(
    service: web::Data<dyn ClockService>,
    user: UserInfo,
    id: Path<String>,
) -> ApiResult<WorkerSnapshot> {
    let id = extract_uuid(&id)?;
    let worker = service.end_shift(user.id, id).await?;
    Ok(ApiResponder(worker))
}

/// Answers 200 even when some workers failed, the report lists them.
#[post("/shifts/{id}/end-all")]
pub async fn end_all_shifts(
    service: web::Data<dyn ClockService>,
    user: UserInfo,
    id: Path<String>,
) -> ApiResult<BulkEndShiftReport> {
    let id = extract_uuid(&id)?;
    let report = service.end_all_shifts(user.id, id).await?;
    Ok(ApiResponder(report))
}
