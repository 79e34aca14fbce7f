// ============================================================================
// Catalog Domain - Products
// ============================================================================
//
// - Model (Product, NewProduct)
// - Errors (CatalogError)
// - Ports (CatalogStore for price lookups, ProductRepository for management)
// - Service (CatalogService: add, list)
//
// ============================================================================

pub mod product;
pub mod errors;
pub mod ports;
pub mod service;

pub use product::*;
pub use errors::*;
pub use ports::*;
pub use service::*;
