pub mod orders;
pub mod parties;
pub mod products;
