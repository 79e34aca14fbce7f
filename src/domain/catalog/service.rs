use std::sync::Arc;

use rust_decimal::Decimal;

use super::errors::CatalogError;
use super::ports::ProductRepository;
use super::product::{NewProduct, Product};

pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// List a new product for `seller_id`.
    pub async fn add_product(
        &self,
        seller_id: i64,
        name: String,
        description: String,
        price: Decimal,
    ) -> Result<Product, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if price < Decimal::ZERO {
            return Err(CatalogError::InvalidPrice(price));
        }

        let product = self
            .products
            .store(NewProduct { name, description, price, seller_id })
            .await
            .map_err(CatalogError::Persistence)?;

        tracing::info!(
            product_id = product.id,
            seller_id = seller_id,
            price = %product.price,
            "✅ Product added to catalog"
        );

        Ok(product)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.get_all().await.map_err(CatalogError::Persistence)?;
        tracing::debug!(count = products.len(), "Loaded catalog");
        Ok(products)
    }
}
