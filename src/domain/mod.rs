// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each area has its own subdirectory with:
// - Model types
// - Errors
// - Ports (store traits the db layer implements)
// - Service / workflow
//
// Nothing here knows about HTTP. Persistence is reached only through the
// port traits, so every service takes its stores as constructor arguments.
//
// ============================================================================

pub mod errors;
pub mod party;
pub mod catalog;
pub mod order;

pub use errors::{ErrorKind, StoreError};
