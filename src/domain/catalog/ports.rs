use async_trait::async_trait;

use crate::domain::StoreError;
use super::product::{NewProduct, Product};

/// Price lookups used by the order workflow. Must always answer from the
/// authoritative store; implementations may not cache.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError>;
}

/// Catalog management on top of the lookup contract.
#[async_trait]
pub trait ProductRepository: CatalogStore {
    async fn store(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// All products ordered by id.
    async fn get_all(&self) -> Result<Vec<Product>, StoreError>;
}
