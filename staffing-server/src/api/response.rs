use actix_web::{
    body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, Responder, ResponseError,
};
use domain_timesheet::exception::{ExceptionKind, TimesheetException};
use serde::Serialize;

/// Envelope of every JSON response.
#[derive(Serialize, Debug)]
pub struct ResponseBase<T> {
    pub status: u16,
    pub message: String,
    pub content: Option<T>,
}

impl<T> ResponseBase<T> {
    pub fn ok(content: Option<T>) -> Self {
        Self {
            status: 200,
            message: "Ok".to_string(),
            content,
        }
    }

    pub fn err(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            content: None,
        }
    }
}

pub struct ApiResponder<T>(pub T);

pub type ApiResult<T> = Result<ApiResponder<T>, ApiError>;

impl<T: Serialize> Responder for ApiResponder<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok().json(ResponseBase::ok(Some(self.0)))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Timesheet(#[from] TimesheetException),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Timesheet(e) => match e.kind() {
                ExceptionKind::InvalidState
                | ExceptionKind::IncompleteShift
                | ExceptionKind::ConcurrentModification => StatusCode::CONFLICT,
                ExceptionKind::TerminalState => StatusCode::UNPROCESSABLE_ENTITY,
                ExceptionKind::ValidationError => StatusCode::BAD_REQUEST,
                ExceptionKind::PermissionDenied => StatusCode::FORBIDDEN,
                ExceptionKind::NotFound => StatusCode::NOT_FOUND,
                ExceptionKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        let mut body = if status.is_server_error() {
            tracing::error!("{self:?}");
            ResponseBase::err(status.as_u16(), "Internal server error.")
        } else {
            tracing::debug!("{self}");
            ResponseBase::err(status.as_u16(), self.to_string())
        };
        if let Self::Timesheet(TimesheetException::IncompleteShift { active_workers, .. }) = self {
            body.content = serde_json::to_value(active_workers).ok();
        }
        HttpResponse::build(status).json(body)
    }
}
