use actix_web::{web, HttpResponse};

use crate::domain::party::Role;
use crate::http::caller::Caller;
use crate::http::dto::{CreateProductRequest, DataResponse, ProductResponse};
use crate::http::errors::ApiError;
use crate::http::AppState;

/// GET /products
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let _timer = state.metrics.start_request_timer("list_products");

    let products: Vec<ProductResponse> =
        state.catalog.list_products().await?.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(DataResponse::new(products)))
}

/// POST /products. The product is listed under the calling seller.
pub async fn add_product(
    state: web::Data<AppState>,
    Caller(caller): Caller,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, ApiError> {
    let _timer = state.metrics.start_request_timer("add_product");
    caller.require(Role::Seller)?;

    let request = body.into_inner();
    let product = state
        .catalog
        .add_product(caller.user_id, request.name, request.description, request.price)
        .await?;
    Ok(HttpResponse::Created().json(DataResponse::new(ProductResponse::from(product))))
}
