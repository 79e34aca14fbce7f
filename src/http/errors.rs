use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::auth::AuthError;
use crate::domain::catalog::CatalogError;
use crate::domain::order::OrderError;
use crate::domain::party::PartyError;
use crate::domain::ErrorKind;

// ============================================================================
// HTTP Error Mapping
// ============================================================================
//
// Every domain error carries an ErrorKind; the kind alone decides the
// status code. Bodies look like:
//
//   {"message": "...", "status": 404, "error": "not_found", "causes": [...]}
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Party(#[from] PartyError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request body could not be decoded.
    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
    pub error: &'static str,
    pub causes: Vec<String>,
}

impl ApiError {
    fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Order(e) => Some(e.kind()),
            ApiError::Catalog(e) => Some(e.kind()),
            ApiError::Party(e) => Some(e.kind()),
            ApiError::Auth(e) => Some(e.kind()),
            ApiError::Unprocessable(_) => None,
            ApiError::Internal(_) => Some(ErrorKind::Internal),
        }
    }

    fn label(&self) -> &'static str {
        match self.kind() {
            Some(ErrorKind::Validation) => "bad_request",
            Some(ErrorKind::NotFound) => "not_found",
            Some(ErrorKind::Unauthorized) => "unauthorized",
            Some(ErrorKind::Forbidden) => "forbidden",
            Some(ErrorKind::Conflict) => "conflict",
            Some(ErrorKind::Persistence) => "service_unavailable",
            Some(ErrorKind::Internal) => "internal_server_error",
            None => "unprocessable_entity",
        }
    }

    fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        causes
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            Some(ErrorKind::Validation) => StatusCode::BAD_REQUEST,
            Some(ErrorKind::NotFound) => StatusCode::NOT_FOUND,
            Some(ErrorKind::Unauthorized) => StatusCode::UNAUTHORIZED,
            Some(ErrorKind::Forbidden) => StatusCode::FORBIDDEN,
            Some(ErrorKind::Conflict) => StatusCode::CONFLICT,
            Some(ErrorKind::Persistence) => StatusCode::SERVICE_UNAVAILABLE,
            Some(ErrorKind::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
            None => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        HttpResponse::build(status).json(ErrorBody {
            message: self.to_string(),
            status: status.as_u16(),
            error: self.label(),
            causes: self.causes(),
        })
    }
}
