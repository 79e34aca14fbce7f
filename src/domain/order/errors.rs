use crate::domain::{ErrorKind, StoreError};

// ============================================================================
// Order Workflow Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order items cannot be empty")]
    EmptyItems,

    #[error("Invalid item quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Invalid {party} id: {id}")]
    InvalidPartyId { party: &'static str, id: i64 },

    #[error("Order total overflows")]
    TotalOverflow,

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("seller {seller_id} does not own order {order_id}")]
    NotOrderSeller { order_id: i64, seller_id: i64 },

    #[error("order store failure")]
    Persistence(#[source] StoreError),

    #[error("stored order data is corrupt")]
    Internal(#[source] StoreError),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::EmptyItems
            | OrderError::InvalidQuantity(_)
            | OrderError::InvalidPartyId { .. }
            | OrderError::TotalOverflow => ErrorKind::Validation,
            OrderError::ProductNotFound(_) | OrderError::OrderNotFound(_) => ErrorKind::NotFound,
            OrderError::NotOrderSeller { .. } => ErrorKind::Forbidden,
            OrderError::Persistence(_) => ErrorKind::Persistence,
            OrderError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Map a store failure while looking up product `id`.
    pub(crate) fn from_product_lookup(id: i64, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => OrderError::ProductNotFound(id),
            other => Self::from_store(other),
        }
    }

    /// Map a store failure while looking up order `id`.
    pub(crate) fn from_order_lookup(id: i64, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => OrderError::OrderNotFound(id),
            other => Self::from_store(other),
        }
    }

    pub(crate) fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::Decode(_) => OrderError::Internal(err),
            other => OrderError::Persistence(other),
        }
    }
}
