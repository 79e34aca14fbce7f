use actix_web::{web, HttpResponse};

use crate::auth::AuthError;
use crate::domain::order::PlaceOrder;
use crate::domain::party::Role;
use crate::http::caller::Caller;
use crate::http::dto::{DataResponse, OrderResponse, PlaceOrderRequest};
use crate::http::errors::ApiError;
use crate::http::AppState;

/// POST /orders (buyers only, acting for themselves)
pub async fn place_order(
    state: web::Data<AppState>,
    Caller(caller): Caller,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let _timer = state.metrics.start_request_timer("place_order");
    caller.require(Role::Buyer)?;

    let command = PlaceOrder::from(body.into_inner());
    if command.buyer_id != caller.user_id {
        return Err(AuthError::IdentityMismatch {
            caller: caller.user_id,
            claimed: command.buyer_id,
        }
        .into());
    }

    let order = state.orders.place_order(command).await?;
    Ok(HttpResponse::Created().json(DataResponse::new(OrderResponse::from(order))))
}

/// GET /orders
pub async fn list_orders(
    state: web::Data<AppState>,
    Caller(caller): Caller,
) -> Result<HttpResponse, ApiError> {
    let _timer = state.metrics.start_request_timer("list_orders");

    let orders = state.orders.list_orders_for_user(caller.user_id, caller.role).await?;
    let orders: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(DataResponse::new(orders)))
}

/// PUT /orders/{id}/accept (sellers only)
pub async fn accept_order(
    state: web::Data<AppState>,
    Caller(caller): Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let _timer = state.metrics.start_request_timer("accept_order");
    caller.require(Role::Seller)?;

    let order = state.orders.accept_order(path.into_inner(), caller.user_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(OrderResponse::from(order))))
}
