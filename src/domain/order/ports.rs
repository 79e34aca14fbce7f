use async_trait::async_trait;

use crate::domain::StoreError;
use super::model::{NewOrder, Order};
use super::value_objects::OrderStatus;

/// Persistence for orders and their lines.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert the header and every line as one transaction. Returns the
    /// order with the assigned order id and line ids. On error nothing is
    /// persisted.
    async fn store(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Header plus lines, or `StoreError::NotFound`.
    async fn get_by_id(&self, id: i64) -> Result<Order, StoreError>;

    /// Orders placed by `buyer_id`, each with its lines, ordered by id.
    async fn get_by_buyer_id(&self, buyer_id: i64) -> Result<Vec<Order>, StoreError>;

    /// Orders addressed to `seller_id`, each with its lines, ordered by id.
    async fn get_by_seller_id(&self, seller_id: i64) -> Result<Vec<Order>, StoreError>;

    /// Compare-and-set on the header status. Returns `true` when this call
    /// moved the order from `from` to `to`, `false` when the order was not
    /// in `from` (including when it does not exist).
    async fn update_status(
        &self,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, StoreError>;
}
