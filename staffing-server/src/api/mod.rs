use std::str::FromStr;

use actix_web::{get, web};
use uuid::Uuid;

use crate::infrastructure::ServiceProvider;
use response::{ApiError, ApiResponder, ApiResult};

pub mod auth;
pub mod clock;
pub mod dtos;
pub mod response;
pub mod shift;
pub mod timesheet;

fn extract_uuid(s: &str) -> Result<Uuid, ApiError> {
    Uuid::from_str(s)
        .map_err(|e| ApiError::BadRequest(format!(r#"error when parse uuid from "{s}": {e}"#)))
}

#[get("/health")]
pub async fn health() -> ApiResult<&'static str> {
    Ok(ApiResponder("healthy"))
}

/// Registers the services and every route. Everything except `/health` needs a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig, sp: &ServiceProvider) {
    cfg.app_data(web::Data::from(sp.clock_service.clone()))
        .app_data(web::Data::from(sp.shift_status_service.clone()))
        .app_data(web::Data::from(sp.timesheet_approval_service.clone()))
        .app_data(
            web::JsonConfig::default()
                .limit(4 * 1024 * 1024)
                .error_handler(|e, _| ApiError::BadRequest(e.to_string()).into()),
        )
        .app_data(
            web::PathConfig::default().error_handler(|e, _| ApiError::BadRequest(e.to_string()).into()),
        )
        .service(health)
        .service(
            web::scope("")
                .wrap(auth::JwtValidation::new(sp.config.jwt()))
                .service(clock::clock_action)
                .service(clock::end_shift)
                .service(clock::end_all_shifts)
                .service(shift::get_shift_status)
                .service(timesheet::finalize_timesheet)
                .service(timesheet::approve_timesheet)
                .service(timesheet::reject_timesheet)
                .service(timesheet::get_timesheet)
                .service(timesheet::get_signature)
                .service(timesheet::export_timesheet),
        );
}
