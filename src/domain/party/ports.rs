use async_trait::async_trait;

use crate::domain::StoreError;
use super::model::{NewParty, Party, Role};

/// Persistence for one side of the marketplace. Each instance is bound to a
/// single role (buyers table or sellers table).
#[async_trait]
pub trait PartyStore: Send + Sync {
    fn role(&self) -> Role;

    /// Insert a new party; returns it with its assigned id.
    async fn store(&self, party: NewParty) -> Result<Party, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<Party, StoreError>;
}
