use actix_web::{
    get,
    http::header::{self, ContentDisposition, DispositionParam, DispositionType},
    post,
    web::{self, Path},
    HttpResponse,
};
use domain_timesheet::{
    model::{entity::Timesheet, vo::ApprovalType},
    service::TimesheetApprovalService,
};

use super::{
    auth::UserInfo,
    dtos::{decode_signature, ApproveTimesheetDto, RejectTimesheetDto, TimesheetStateDto},
    extract_uuid,
    response::{ApiError, ApiResponder, ApiResult},
};

#[post("/shifts/{id}/timesheet")]
pub async fn finalize_timesheet(
    service: web::Data<dyn TimesheetApprovalService>,
    user: UserInfo,
    id: Path<String>,
) -> ApiResult<TimesheetStateDto> {
    let shift_id = extract_uuid(&id)?;
    let timesheet = service.finalize_timesheet(user.id, shift_id).await?;
    Ok(ApiResponder(timesheet.into()))
}

#[post("/timesheets/{id}/approve")]
pub async fn approve_timesheet(
    service: web::Data<dyn TimesheetApprovalService>,
    user: UserInfo,
    id: Path<String>,
    body: web::Json<ApproveTimesheetDto>,
) -> ApiResult<TimesheetStateDto> {
    let id = extract_uuid(&id)?;
    let body = body.into_inner();
    let signature = decode_signature(&body.signature)?;
    let timesheet = service
        .approve_timesheet(user.id, id, body.approval_type, signature)
        .await?;
    Ok(ApiResponder(timesheet.into()))
}

#[post("/timesheets/{id}/reject")]
pub async fn reject_timesheet(
    service: web::Data<dyn TimesheetApprovalService>,
    user: UserInfo,
    id: Path<String>,
    body: web::Json<RejectTimesheetDto>,
) -> ApiResult<TimesheetStateDto> {
    let id = extract_uuid(&id)?;
    let timesheet = service
        .reject_timesheet(user.id, id, body.into_inner().reason)
        .await?;
    Ok(ApiResponder(timesheet.into()))
}

#[get("/timesheets/{id}")]
pub async fn get_timesheet(
    service: web::Data<dyn TimesheetApprovalService>,
    user: UserInfo,
    id: Path<String>,
) -> ApiResult<Timesheet> {
    let id = extract_uuid(&id)?;
    let timesheet = service.get_timesheet(user.id, id).await?;
    Ok(ApiResponder(timesheet))
}

#[get("/timesheets/{id}/signatures/{kind}")]
pub async fn get_signature(
    service: web::Data<dyn TimesheetApprovalService>,
    user: UserInfo,
    path: Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (id, kind) = path.into_inner();
    let id = extract_uuid(&id)?;
    let kind = kind.parse::<ApprovalType>().map_err(ApiError::BadRequest)?;
    let image = service.get_signature(user.id, id, kind).await?;
    Ok(HttpResponse::Ok().content_type("image/png").body(image))
}

#[get("/timesheets/{id}/export")]
pub async fn export_timesheet(
    service: web::Data<dyn TimesheetApprovalService>,
    user: UserInfo,
    id: Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = extract_uuid(&id)?;
    let csv = service.export_timesheet(user.id, id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(format!("timesheet-{id}.csv"))],
            },
        ))
        .body(csv))
}
