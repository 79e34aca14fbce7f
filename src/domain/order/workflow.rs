use std::sync::Arc;

use chrono::Utc;

use crate::domain::catalog::{CatalogStore, Product};
use crate::domain::party::Role;
use crate::metrics::Metrics;

use super::commands::PlaceOrder;
use super::errors::OrderError;
use super::model::{NewOrder, NewOrderLine, Order, OrderLineView, OrderView};
use super::ports::OrderStore;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Workflow
// ============================================================================
//
// Orchestrates: Request → Catalog re-pricing → Totals → Order Store
//
// Stateless between calls. Every call reads prices from the catalog store;
// consistency across concurrent requests is left to the store (atomic
// insert, compare-and-set status update).
//
// ============================================================================

pub struct OrderWorkflow {
    orders: Arc<dyn OrderStore>,
    catalog: Arc<dyn CatalogStore>,
    metrics: Arc<Metrics>,
}

impl OrderWorkflow {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        catalog: Arc<dyn CatalogStore>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { orders, catalog, metrics }
    }

    /// Price the requested lines against the catalog and persist the order
    /// with all its lines atomically.
    pub async fn place_order(&self, command: PlaceOrder) -> Result<OrderView, OrderError> {
        let result = self.try_place_order(command).await;
        match &result {
            Ok(order) => self.metrics.record_order_placed(order.items.len()),
            Err(e) => self.record_failure("place_order", e),
        }
        result
    }

    /// Orders where the user is the buyer (`Role::Buyer`) or the seller
    /// (`Role::Seller`), each line carrying current catalog details next to
    /// its snapshot price. Fails as a whole if any product is gone.
    pub async fn list_orders_for_user(
        &self,
        user_id: i64,
        role: Role,
    ) -> Result<Vec<OrderView>, OrderError> {
        let result = self.try_list_orders(user_id, role).await;
        if let Err(e) = &result {
            self.record_failure("list_orders", e);
        }
        result
    }

    /// Move a pending order to `Accepted` on behalf of `seller_id`.
    ///
    /// Accepting an already accepted order succeeds without writing.
    pub async fn accept_order(&self, order_id: i64, seller_id: i64) -> Result<OrderView, OrderError> {
        let result = self.try_accept_order(order_id, seller_id).await;
        if let Err(e) = &result {
            self.record_failure("accept_order", e);
        }
        result
    }

    async fn try_place_order(&self, command: PlaceOrder) -> Result<OrderView, OrderError> {
        command.validate()?;

        let mut lines = Vec::with_capacity(command.items.len());
        for item in &command.items {
            let product = self.product(item.product_id).await?;
            lines.push(NewOrderLine { product, quantity: item.quantity });
        }

        let new_order = NewOrder::priced(command, lines, Utc::now())?;
        let products: Vec<Product> = new_order.items.iter().map(|l| l.product.clone()).collect();

        let order = self
            .orders
            .store(new_order)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to persist order");
                OrderError::from_store(e)
            })?;

        tracing::info!(
            order_id = order.id,
            buyer_id = order.buyer_id,
            seller_id = order.seller_id,
            line_count = order.items.len(),
            total_quantity = order.total_quantity,
            total_price = %order.total_price,
            "✅ Order placed"
        );

        let items = order
            .items
            .iter()
            .cloned()
            .zip(products)
            .map(|(line, product)| OrderLineView::new(line, product))
            .collect();

        Ok(OrderView::from_parts(order, items))
    }

    async fn try_list_orders(&self, user_id: i64, role: Role) -> Result<Vec<OrderView>, OrderError> {
        let orders = match role {
            Role::Buyer => self.orders.get_by_buyer_id(user_id).await,
            Role::Seller => self.orders.get_by_seller_id(user_id).await,
        }
        .map_err(OrderError::from_store)?;

        tracing::debug!(user_id = user_id, role = %role, count = orders.len(), "Loaded orders");

        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            views.push(self.hydrate(order).await?);
        }
        Ok(views)
    }

    async fn try_accept_order(&self, order_id: i64, seller_id: i64) -> Result<OrderView, OrderError> {
        let order = self
            .orders
            .get_by_id(order_id)
            .await
            .map_err(|e| OrderError::from_order_lookup(order_id, e))?;

        if order.seller_id != seller_id {
            tracing::warn!(
                order_id = order_id,
                seller_id = seller_id,
                owner_id = order.seller_id,
                "Acceptance rejected, caller is not the order's seller"
            );
            return Err(OrderError::NotOrderSeller { order_id, seller_id });
        }

        // Resolve lines before writing so a failure leaves the status as it was.
        let mut view = self.hydrate(order).await?;

        if !view.status.can_transition_to(OrderStatus::Accepted) {
            tracing::debug!(order_id = order_id, "Order already accepted");
            return Ok(view);
        }

        let transitioned = self
            .orders
            .update_status(order_id, OrderStatus::Pending, OrderStatus::Accepted)
            .await
            .map_err(|e| {
                tracing::error!(order_id = order_id, error = %e, "Failed to update order status");
                OrderError::from_store(e)
            })?;

        if transitioned {
            self.metrics.record_order_accepted();
            tracing::info!(order_id = order_id, seller_id = seller_id, "✅ Order accepted");
        } else {
            tracing::debug!(order_id = order_id, "Order accepted by a concurrent request");
        }

        view.status = OrderStatus::Accepted;
        Ok(view)
    }

    async fn hydrate(&self, mut order: Order) -> Result<OrderView, OrderError> {
        let lines = std::mem::take(&mut order.items);

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self.product(line.product_id).await?;
            items.push(OrderLineView::new(line, product));
        }

        Ok(OrderView::from_parts(order, items))
    }

    async fn product(&self, product_id: i64) -> Result<Product, OrderError> {
        self.catalog
            .get_by_id(product_id)
            .await
            .map_err(|e| OrderError::from_product_lookup(product_id, e))
    }

    fn record_failure(&self, operation: &str, error: &OrderError) {
        let kind = error.kind();
        self.metrics.record_workflow_failure(operation, kind.as_str());
        tracing::warn!(operation = operation, kind = kind.as_str(), error = %error, "Order workflow failed");
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
