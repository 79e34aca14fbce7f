use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::order::{NewOrder, Order, OrderLine, OrderStatus, OrderStore};
use crate::domain::StoreError;

// ============================================================================
// PostgreSQL Order Store
// ============================================================================
//
// orders         - one header row per order
// order_details  - one row per line, with the unit price snapshot
//
// Inserts run in one transaction. The transaction rolls back when dropped,
// so any `?` before commit leaves no header and no lines behind.
//
// ============================================================================

type OrderRow = (i64, i64, i64, String, String, i64, Decimal, i16, DateTime<Utc>);
type LineRow = (i64, i64, i64, Decimal);

const SELECT_ORDER: &str = "SELECT id, buyer_id, seller_id, delivery_source_address, \
     delivery_destination_address, total_quantity, total_price, status, order_date \
     FROM orders";

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lines(&self, order_id: i64) -> Result<Vec<OrderLine>, StoreError> {
        let rows: Vec<LineRow> = sqlx::query_as(
            "SELECT id, product_id, quantity, unit_price FROM order_details \
             WHERE order_id = $1 ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, product_id, quantity, unit_price)| OrderLine {
                id,
                product_id,
                quantity,
                unit_price,
            })
            .collect())
    }

    async fn hydrate(&self, row: OrderRow) -> Result<Order, StoreError> {
        let (id, buyer_id, seller_id, source, destination, total_quantity, total_price, status, order_date) =
            row;

        let status = OrderStatus::from_code(status)
            .ok_or_else(|| StoreError::Decode(format!("order {} has unknown status {}", id, status)))?;

        Ok(Order {
            id,
            buyer_id,
            seller_id,
            delivery_source_address: source,
            delivery_destination_address: destination,
            total_quantity,
            total_price,
            status,
            order_date,
            items: self.lines(id).await?,
        })
    }

    async fn hydrate_all(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, StoreError> {
        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.hydrate(row).await?);
        }
        Ok(orders)
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn store(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut tx = self.pool.begin().await?;

        let order_id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (buyer_id, seller_id, delivery_source_address, \
             delivery_destination_address, total_quantity, total_price, status, order_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(order.buyer_id)
        .bind(order.seller_id)
        .bind(&order.delivery_source_address)
        .bind(&order.delivery_destination_address)
        .bind(order.total_quantity)
        .bind(order.total_price)
        .bind(order.status.code())
        .bind(order.order_date)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(order.items.len());
        for line in &order.items {
            let line_id: i64 = sqlx::query_scalar(
                "INSERT INTO order_details (order_id, product_id, quantity, unit_price) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(order_id)
            .bind(line.product.id)
            .bind(line.quantity)
            .bind(line.unit_price())
            .fetch_one(&mut *tx)
            .await?;

            items.push(OrderLine {
                id: line_id,
                product_id: line.product.id,
                quantity: line.quantity,
                unit_price: line.unit_price(),
            });
        }

        tx.commit().await?;

        tracing::debug!(order_id = order_id, line_count = items.len(), "Order rows committed");

        Ok(Order {
            id: order_id,
            buyer_id: order.buyer_id,
            seller_id: order.seller_id,
            delivery_source_address: order.delivery_source_address,
            delivery_destination_address: order.delivery_destination_address,
            total_quantity: order.total_quantity,
            total_price: order.total_price,
            status: order.status,
            order_date: order.order_date,
            items,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Order, StoreError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ORDER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => self.hydrate(row).await,
            None => Err(StoreError::NotFound),
        }
    }

    async fn get_by_buyer_id(&self, buyer_id: i64) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<OrderRow> =
            sqlx::query_as(&format!("{} WHERE buyer_id = $1 ORDER BY id", SELECT_ORDER))
                .bind(buyer_id)
                .fetch_all(&self.pool)
                .await?;

        self.hydrate_all(rows).await
    }

    async fn get_by_seller_id(&self, seller_id: i64) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<OrderRow> =
            sqlx::query_as(&format!("{} WHERE seller_id = $1 ORDER BY id", SELECT_ORDER))
                .bind(seller_id)
                .fetch_all(&self.pool)
                .await?;

        self.hydrate_all(rows).await
    }

    async fn update_status(
        &self,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2 AND status = $3")
            .bind(to.code())
            .bind(id)
            .bind(from.code())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
