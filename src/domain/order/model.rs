use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;

use crate::domain::catalog::Product;
use super::commands::PlaceOrder;
use super::errors::OrderError;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Model
// ============================================================================
//
// NewOrder   - priced, not yet persisted (no ids)
// Order      - as persisted: header + lines with snapshot prices
// OrderView  - Order with each line's product resolved from the catalog
//
// Invariants (enforced by NewOrder::priced, the only constructor):
//   total_quantity == sum(line.quantity)
//   total_price    == sum(line.unit_price * line.quantity)
//
// ============================================================================

/// A line priced against the catalog at order time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    pub product: Product,
    pub quantity: i64,
}

impl NewOrderLine {
    /// Snapshot price captured into the order line.
    pub fn unit_price(&self) -> Decimal {
        self.product.price
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub delivery_source_address: String,
    pub delivery_destination_address: String,
    pub total_quantity: i64,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub items: Vec<NewOrderLine>,
}

impl NewOrder {
    /// Build a pending order from a request and its catalog-resolved lines,
    /// computing totals with exact decimal arithmetic.
    pub fn priced(
        command: PlaceOrder,
        items: Vec<NewOrderLine>,
        order_date: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let (total_quantity, total_price) = totals(&items)?;

        Ok(Self {
            buyer_id: command.buyer_id,
            seller_id: command.seller_id,
            delivery_source_address: command.delivery_source_address,
            delivery_destination_address: command.delivery_destination_address,
            total_quantity,
            total_price,
            status: OrderStatus::Pending,
            order_date: order_date.trunc_subsecs(0),
            items,
        })
    }
}

fn totals(items: &[NewOrderLine]) -> Result<(i64, Decimal), OrderError> {
    items
        .iter()
        .try_fold((0i64, Decimal::ZERO), |(quantity, price), line| {
            let line_total = line
                .unit_price()
                .checked_mul(Decimal::from(line.quantity))
                .ok_or(OrderError::TotalOverflow)?;

            Ok((
                quantity.checked_add(line.quantity).ok_or(OrderError::TotalOverflow)?,
                price.checked_add(line_total).ok_or(OrderError::TotalOverflow)?,
            ))
        })
}

/// A persisted order line. `unit_price` is the snapshot taken at order time
/// and never follows later catalog changes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub delivery_source_address: String,
    pub delivery_destination_address: String,
    pub total_quantity: i64,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineView {
    pub id: i64,
    pub product: Product,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl OrderLineView {
    pub fn new(line: OrderLine, product: Product) -> Self {
        Self {
            id: line.id,
            product,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub delivery_source_address: String,
    pub delivery_destination_address: String,
    pub total_quantity: i64,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub items: Vec<OrderLineView>,
}

impl OrderView {
    /// Combine a persisted header with already-resolved lines. The header's
    /// own line list is discarded in favour of `items`.
    pub fn from_parts(order: Order, items: Vec<OrderLineView>) -> Self {
        Self {
            id: order.id,
            buyer_id: order.buyer_id,
            seller_id: order.seller_id,
            delivery_source_address: order.delivery_source_address,
            delivery_destination_address: order.delivery_destination_address,
            total_quantity: order.total_quantity,
            total_price: order.total_price,
            status: order.status,
            order_date: order.order_date,
            items,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::LineItem;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id,
            name: format!("product-{}", id),
            description: String::new(),
            price,
            seller_id: 1,
        }
    }

    fn command() -> PlaceOrder {
        PlaceOrder {
            buyer_id: 1,
            seller_id: 1,
            delivery_source_address: "Jakarta".into(),
            delivery_destination_address: "Bandung".into(),
            items: vec![LineItem::new(1, 10)],
        }
    }

    #[test]
    fn test_priced_order_totals_are_exact() {
        let lines = vec![NewOrderLine { product: product(1, dec!(181818.11)), quantity: 10 }];
        let order = NewOrder::priced(command(), lines, Utc::now()).unwrap();

        assert_eq!(order.total_quantity, 10);
        assert_eq!(order.total_price, dec!(1818181.10));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_many_small_prices_do_not_drift() {
        // 0.1 has no exact binary representation; a float sum would drift.
        let lines: Vec<_> = (1..=1000)
            .map(|id| NewOrderLine { product: product(id, dec!(0.10)), quantity: 3 })
            .collect();

        let order = NewOrder::priced(command(), lines, Utc::now()).unwrap();
        assert_eq!(order.total_quantity, 3000);
        assert_eq!(order.total_price, dec!(300.00));
    }

    #[test]
    fn test_mixed_lines_sum() {
        let lines = vec![
            NewOrderLine { product: product(1, dec!(19.99)), quantity: 3 },
            NewOrderLine { product: product(2, dec!(0.01)), quantity: 7 },
            NewOrderLine { product: product(3, dec!(0)), quantity: 4 },
        ];

        let order = NewOrder::priced(command(), lines, Utc::now()).unwrap();
        assert_eq!(order.total_quantity, 14);
        assert_eq!(order.total_price, dec!(60.04));
    }

    #[test]
    fn test_order_date_truncated_to_seconds() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap()
            + chrono::Duration::milliseconds(987);
        let lines = vec![NewOrderLine { product: product(1, dec!(1)), quantity: 1 }];

        let order = NewOrder::priced(command(), lines, at).unwrap();
        assert_eq!(order.order_date, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap());
    }

    #[test]
    fn test_overflow_is_reported() {
        let lines = vec![NewOrderLine { product: product(1, Decimal::MAX), quantity: 2 }];
        assert!(matches!(
            NewOrder::priced(command(), lines, Utc::now()),
            Err(OrderError::TotalOverflow)
        ));
    }

    #[test]
    fn test_view_keeps_snapshot_price_next_to_current_product() {
        let order = Order {
            id: 5,
            buyer_id: 1,
            seller_id: 2,
            delivery_source_address: "A".into(),
            delivery_destination_address: "B".into(),
            total_quantity: 2,
            total_price: dec!(20),
            status: OrderStatus::Pending,
            order_date: Utc::now().trunc_subsecs(0),
            items: vec![],
        };
        let line = OrderLine { id: 11, product_id: 3, quantity: 2, unit_price: dec!(10) };

        let view = OrderView::from_parts(order, vec![OrderLineView::new(line, product(3, dec!(12)))]);

        assert_eq!(view.id, 5);
        assert_eq!(view.items[0].unit_price, dec!(10));
        assert_eq!(view.items[0].product.price, dec!(12));
    }
}
