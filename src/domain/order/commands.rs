use super::errors::OrderError;
use super::value_objects::LineItem;

// ============================================================================
// Order Commands - Represent caller intent
// ============================================================================

/// Request to place an order. Carries no totals; those come from the
/// catalog.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub delivery_source_address: String,
    pub delivery_destination_address: String,
    pub items: Vec<LineItem>,
}

impl PlaceOrder {
    /// Check the request before any catalog lookup happens.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.buyer_id <= 0 {
            return Err(OrderError::InvalidPartyId { party: "buyer", id: self.buyer_id });
        }
        if self.seller_id <= 0 {
            return Err(OrderError::InvalidPartyId { party: "seller", id: self.seller_id });
        }
        if self.items.is_empty() {
            return Err(OrderError::EmptyItems);
        }

        for item in &self.items {
            if item.quantity <= 0 {
                return Err(OrderError::InvalidQuantity(item.quantity));
            }
        }

        Ok(())
    }
}
