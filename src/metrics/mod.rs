// Private module declaration
mod server;

use prometheus::{
    HistogramOpts, HistogramTimer, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
};

// Re-export for public API
pub use server::configure;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Orders placed / accepted and line items ordered
// - Order workflow failures by operation and error kind
// - HTTP handler latency by route
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the service. Each instance owns its own
/// registry, so tests can create as many as they like.
pub struct Metrics {
    registry: Registry,

    // Order Workflow Metrics
    pub orders_placed_total: IntCounter,
    pub orders_accepted_total: IntCounter,
    pub order_line_items_total: IntCounter,
    pub workflow_failures: IntCounterVec,

    // HTTP Metrics
    pub request_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Order Workflow Metrics
        let orders_placed_total = IntCounter::new(
            "orders_placed_total",
            "Total orders placed",
        )?;
        registry.register(Box::new(orders_placed_total.clone()))?;

        let orders_accepted_total = IntCounter::new(
            "orders_accepted_total",
            "Total orders moved from pending to accepted",
        )?;
        registry.register(Box::new(orders_accepted_total.clone()))?;

        let order_line_items_total = IntCounter::new(
            "order_line_items_total",
            "Total line items across placed orders",
        )?;
        registry.register(Box::new(order_line_items_total.clone()))?;

        let workflow_failures = IntCounterVec::new(
            Opts::new("order_workflow_failures_total", "Order workflow failures"),
            &["operation", "kind"],
        )?;
        registry.register(Box::new(workflow_failures.clone()))?;

        // HTTP Metrics
        let request_duration = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP handler duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["route"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry,
            orders_placed_total,
            orders_accepted_total,
            order_line_items_total,
            workflow_failures,
            request_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_placed(&self, line_items: usize) {
        self.orders_placed_total.inc();
        self.order_line_items_total.inc_by(line_items as u64);
    }

    pub fn record_order_accepted(&self) {
        self.orders_accepted_total.inc();
    }

    pub fn record_workflow_failure(&self, operation: &str, kind: &str) {
        self.workflow_failures.with_label_values(&[operation, kind]).inc();
    }

    /// Observes the elapsed time into the route's histogram when dropped.
    pub fn start_request_timer(&self, route: &str) -> HistogramTimer {
        self.request_duration.with_label_values(&[route]).start_timer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(metrics.registry.gather().len() > 0);
    }

    #[test]
    fn test_record_order_placed() {
        let metrics = Metrics::new().unwrap();
        metrics.record_order_placed(3);
        metrics.record_order_placed(2);

        assert_eq!(metrics.orders_placed_total.get(), 2);
        assert_eq!(metrics.order_line_items_total.get(), 5);

        let gathered = metrics.registry.gather();
        let placed = gathered.iter().find(|m| m.name() == "orders_placed_total").unwrap();
        assert_eq!(placed.metric[0].counter.value, Some(2.0));
    }

    #[test]
    fn test_record_failures_by_label() {
        let metrics = Metrics::new().unwrap();
        metrics.record_workflow_failure("place_order", "not_found");
        metrics.record_workflow_failure("place_order", "validation");
        metrics.record_workflow_failure("place_order", "not_found");

        let gathered = metrics.registry.gather();
        let failures = gathered
            .iter()
            .find(|m| m.name() == "order_workflow_failures_total")
            .unwrap();
        assert_eq!(failures.metric.len(), 2);
        assert_eq!(
            metrics.workflow_failures.with_label_values(&["place_order", "not_found"]).get(),
            2
        );
    }

    #[test]
    fn test_request_timer_observes_on_drop() {
        let metrics = Metrics::new().unwrap();
        drop(metrics.start_request_timer("place_order"));

        let histogram = metrics.request_duration.with_label_values(&["place_order"]);
        assert_eq!(histogram.get_sample_count(), 1);
    }
}
