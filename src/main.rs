use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod config;
mod db;
mod domain;
mod http;
mod metrics;
mod utils;

use auth::{BcryptHasher, IdentityGate, TokenSigner};
use config::AppConfig;
use db::{PgOrderStore, PgPartyStore, PgProductStore};
use domain::catalog::{CatalogService, CatalogStore, ProductRepository};
use domain::order::OrderWorkflow;
use domain::party::{PartyService, Role};
use http::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,marketplace=debug"))
        )
        .init();

    tracing::info!("🚀 Starting marketplace service");

    // === 1. Configuration ===
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // === 2. PostgreSQL pool and schema ===
    tracing::info!("Connecting to PostgreSQL...");
    let pool = db::connect(&config)
        .await
        .context("Failed to connect to PostgreSQL")?;
    db::ensure_schema(&pool)
        .await
        .context("Failed to prepare database schema")?;

    // === 3. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 4. Identity gate and services ===
    let tokens = Arc::new(TokenSigner::new(config.token_secret.clone(), config.token_ttl())?);
    let hasher = Arc::new(BcryptHasher::default());

    let products = Arc::new(PgProductStore::new(pool.clone()));
    let catalog_lookup: Arc<dyn CatalogStore> = products.clone();
    let product_repository: Arc<dyn ProductRepository> = products;
    let gate: Arc<dyn IdentityGate> = tokens.clone();

    let state = web::Data::new(AppState {
        orders: OrderWorkflow::new(
            Arc::new(PgOrderStore::new(pool.clone())),
            catalog_lookup,
            metrics.clone(),
        ),
        catalog: CatalogService::new(product_repository),
        buyers: PartyService::new(
            Arc::new(PgPartyStore::new(pool.clone(), Role::Buyer)),
            hasher.clone(),
            tokens.clone(),
        ),
        sellers: PartyService::new(
            Arc::new(PgPartyStore::new(pool.clone(), Role::Seller)),
            hasher,
            tokens,
        ),
        gate,
        metrics: metrics.clone(),
    });
    let metrics_data = web::Data::from(metrics);

    // === 5. HTTP server ===
    let (host, port) = config.bind_address();
    tracing::info!(host = %host, port = port, "✅ Listening for HTTP requests");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(metrics_data.clone())
            .configure(http::configure)
            .configure(metrics::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await?;

    tracing::info!("Shutting down");
    pool.close().await;
    Ok(())
}
