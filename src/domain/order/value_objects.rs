use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================

/// One requested (product, quantity) pair. Carries no price: prices are
/// always resolved from the catalog at order time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LineItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl LineItem {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        Self { product_id, quantity }
    }
}

/// Order lifecycle. `Pending` is initial, `Accepted` is terminal; the only
/// transition is Pending -> Accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Accepted,
}

impl OrderStatus {
    /// Numeric code used on the wire and in the `orders.status` column.
    pub fn code(&self) -> i16 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Accepted => 1,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(OrderStatus::Pending),
            1 => Some(OrderStatus::Accepted),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!((self, next), (OrderStatus::Pending, OrderStatus::Accepted))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
