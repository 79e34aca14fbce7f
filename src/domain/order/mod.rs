// ============================================================================
// Order Domain - Placement and Fulfillment
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (LineItem, OrderStatus)
// - Commands (PlaceOrder)
// - Errors (OrderError enum)
// - Model (NewOrder, Order, OrderView and their lines)
// - Ports (OrderStore)
// - Workflow (OrderWorkflow: place, list, accept)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod errors;
pub mod model;
pub mod ports;
pub mod workflow;

// Re-export for convenience
pub use value_objects::*;
pub use commands::*;
pub use errors::*;
pub use model::*;
pub use ports::*;
pub use workflow::*;
