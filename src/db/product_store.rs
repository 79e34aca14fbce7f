use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::catalog::{CatalogStore, NewProduct, Product, ProductRepository};
use crate::domain::StoreError;

type ProductRow = (i64, String, String, Decimal, i64);

fn product((id, name, description, price, seller_id): ProductRow) -> Product {
    Product { id, name, description, price, seller_id }
}

/// Catalog backed by the `products` table. Every lookup hits the database.
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgProductStore {
    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price, seller_id FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(product).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl ProductRepository for PgProductStore {
    async fn store(&self, new_product: NewProduct) -> Result<Product, StoreError> {
        let row: ProductRow = sqlx::query_as(
            "INSERT INTO products (name, description, price, seller_id) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, description, price, seller_id",
        )
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(new_product.price)
        .bind(new_product.seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product(row))
    }

    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, name, description, price, seller_id FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(product).collect())
    }
}
