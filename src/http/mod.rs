// ============================================================================
// HTTP Surface - actix-web routes over the domain services
// ============================================================================
//
// POST /buyers/register      POST /buyers/login
// POST /sellers/register     POST /sellers/login
// GET  /products             POST /products            (seller)
// POST /orders   (buyer)     GET  /orders              (any role)
// PUT  /orders/{id}/accept   (seller)
//
// ============================================================================

mod caller;
mod dto;
mod errors;
mod handlers;

use std::sync::Arc;

use actix_web::web;

use crate::auth::IdentityGate;
use crate::domain::catalog::CatalogService;
use crate::domain::order::OrderWorkflow;
use crate::domain::party::PartyService;
use crate::metrics::Metrics;

use errors::ApiError;
use handlers::{orders, parties, products};

/// Everything a handler needs, shared across workers.
pub struct AppState {
    pub orders: OrderWorkflow,
    pub catalog: CatalogService,
    pub buyers: PartyService,
    pub sellers: PartyService,
    pub gate: Arc<dyn IdentityGate>,
    pub metrics: Arc<Metrics>,
}

/// Mount the API routes. Expects `web::Data<AppState>` in app data.
///
/// `GET /orders/by-id` is a compatibility alias of `GET /orders` kept for
/// older clients. It takes no id and lists the caller's own orders.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Unprocessable(err.to_string()).into()
    }))
    .route("/buyers/register", web::post().to(parties::register_buyer))
    .route("/buyers/login", web::post().to(parties::login_buyer))
    .route("/sellers/register", web::post().to(parties::register_seller))
    .route("/sellers/login", web::post().to(parties::login_seller))
    .route("/products", web::get().to(products::list_products))
    .route("/products", web::post().to(products::add_product))
    .route("/orders", web::post().to(orders::place_order))
    .route("/orders", web::get().to(orders::list_orders))
    // Compatibility alias, ignores any query string
    .route("/orders/by-id", web::get().to(orders::list_orders))
    .route("/orders/{id}/accept", web::put().to(orders::accept_order));
}
