use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::{bearer_token, AuthError, Identity};

use super::errors::ApiError;
use super::AppState;

/// The authenticated caller, taken from `Authorization: Bearer <token>`.
/// Handlers that take a `Caller` reject unauthenticated requests with 401.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Identity);

impl FromRequest for Caller {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Caller, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("application state not configured".to_string()))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let identity = state.gate.verify(bearer_token(header)?).map_err(|e| {
        tracing::warn!(error = %e, path = req.path(), "Rejected bearer token");
        e
    })?;

    Ok(Caller(identity))
}
