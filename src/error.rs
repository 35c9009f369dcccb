use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

use crate::payroll::screen::ScreenKind;
use crate::remote::ApiError;

/// Errors returned by the console's own endpoints.
#[derive(Debug, Display)]
pub enum ConsoleError {
    /// Operator input that blocks the action (no section, bad month, ...).
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "Missing or expired console session")]
    NoSession,

    #[display(fmt = "{} not found", _0)]
    NotFound(String),

    #[display(fmt = "A save or refresh is already running on the {} screen", _0)]
    Busy(ScreenKind),

    #[display(fmt = "{}", _0)]
    Remote(ApiError),
}

impl std::error::Error for ConsoleError {}

impl From<ApiError> for ConsoleError {
    fn from(e: ApiError) -> Self {
        ConsoleError::Remote(e)
    }
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation(message.into())
    }
}

impl ResponseError for ConsoleError {
    fn status_code(&self) -> StatusCode {
        match self {
            ConsoleError::Validation(_) => StatusCode::BAD_REQUEST,
            ConsoleError::NoSession => StatusCode::UNAUTHORIZED,
            ConsoleError::NotFound(_) => StatusCode::NOT_FOUND,
            ConsoleError::Busy(_) => StatusCode::CONFLICT,
            ConsoleError::Remote(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(
            ConsoleError::validation("Please select a month").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ConsoleError::NoSession.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ConsoleError::Busy(ScreenKind::Wages).to_string(),
            "A save or refresh is already running on the wages screen"
        );
        let remote = ConsoleError::from(ApiError::server(500, b"{\"message\":\"down\"}"));
        assert_eq!(remote.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(remote.to_string(), "Error: 500 - down");
    }
}
