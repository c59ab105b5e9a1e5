use crate::dto::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use resources_domain::domain::errors::DomainError;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(e) => match e {
                DomainError::UserNotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::UserAlreadyExists { .. } => StatusCode::CONFLICT,
                DomainError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
                DomainError::AuthenticationFailed { .. } | DomainError::InvalidToken { .. } => {
                    StatusCode::UNAUTHORIZED
                }
                DomainError::AuthorizationFailed { .. } => StatusCode::FORBIDDEN,
                DomainError::ExternalService { .. }
                | DomainError::Configuration { .. }
                | DomainError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if status.is_server_error() {
            error!("Request failed: {}", self);
            ErrorResponse::new("Internal server error")
        } else {
            warn!(status = status.as_u16(), "Request rejected: {}", self);
            match self {
                AppError::Domain(DomainError::InvalidRequest { violations }) => {
                    let mut fields = BTreeMap::new();
                    for violation in violations {
                        fields.entry(violation.field).or_insert(violation.message);
                    }
                    ErrorResponse::with_fields("Invalid request", fields)
                }
                AppError::Domain(e) => ErrorResponse::new(e.to_string()),
                AppError::BadRequest(msg) | AppError::Unauthorized(msg) => ErrorResponse::new(msg),
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
