use actix_web::{web, HttpResponse};

use crate::domain::party::{PartyService, Registration};
use crate::http::dto::{
    DataResponse, LoginRequest, LoginResponse, PartyResponse, RegisterBuyerRequest,
    RegisterSellerRequest,
};
use crate::http::errors::ApiError;
use crate::http::AppState;

async fn register(parties: &PartyService, registration: Registration) -> Result<HttpResponse, ApiError> {
    let party = parties.register(registration).await?;
    Ok(HttpResponse::Created().json(DataResponse::new(PartyResponse::from(party))))
}

async fn login(parties: &PartyService, request: LoginRequest) -> Result<HttpResponse, ApiError> {
    let (party, token) = parties.login(&request.email, &request.password).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        role: party.role,
        data: PartyResponse::from(party),
        token,
    }))
}

/// POST /buyers/register
pub async fn register_buyer(
    state: web::Data<AppState>,
    body: web::Json<RegisterBuyerRequest>,
) -> Result<HttpResponse, ApiError> {
    let _timer = state.metrics.start_request_timer("register_buyer");
    register(&state.buyers, body.into_inner().into()).await
}

/// POST /buyers/login
pub async fn login_buyer(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let _timer = state.metrics.start_request_timer("login_buyer");
    login(&state.buyers, body.into_inner()).await
}

/// POST /sellers/register
pub async fn register_seller(
    state: web::Data<AppState>,
    body: web::Json<RegisterSellerRequest>,
) -> Result<HttpResponse, ApiError> {
    let _timer = state.metrics.start_request_timer("register_seller");
    register(&state.sellers, body.into_inner().into()).await
}

/// POST /sellers/login
pub async fn login_seller(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let _timer = state.metrics.start_request_timer("login_seller");
    login(&state.sellers, body.into_inner()).await
}
