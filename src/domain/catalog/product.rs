use rust_decimal::Decimal;

// ============================================================================
// Catalog Model
// ============================================================================

/// A catalog entry. `price` is the authoritative current unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub seller_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub seller_id: i64,
}
