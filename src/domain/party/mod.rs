// ============================================================================
// Party Domain - Buyers and Sellers
// ============================================================================
//
// - Model (Role, Party, NewParty)
// - Errors (PartyError)
// - Ports (PartyStore)
// - Service (PartyService: register, login)
//
// ============================================================================

pub mod model;
pub mod errors;
pub mod ports;
pub mod service;

pub use model::*;
pub use errors::*;
pub use ports::*;
pub use service::*;
