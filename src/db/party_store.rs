use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::party::{NewParty, Party, PartyStore, Role};
use crate::domain::StoreError;

type PartyRow = (i64, String, String, String, String);

/// Buyers and sellers live in separate tables with a role-specific address
/// column. One store instance serves one role.
pub struct PgPartyStore {
    pool: PgPool,
    role: Role,
}

impl PgPartyStore {
    pub fn new(pool: PgPool, role: Role) -> Self {
        Self { pool, role }
    }

    fn table(&self) -> (&'static str, &'static str) {
        match self.role {
            Role::Buyer => ("buyers", "sending_address"),
            Role::Seller => ("sellers", "pickup_address"),
        }
    }

    fn party(&self, (id, email, name, credential_hash, address): PartyRow) -> Party {
        Party { id, role: self.role, email, name, credential_hash, address }
    }
}

#[async_trait]
impl PartyStore for PgPartyStore {
    fn role(&self) -> Role {
        self.role
    }

    async fn store(&self, party: NewParty) -> Result<Party, StoreError> {
        let (table, address) = self.table();
        let sql = format!(
            "INSERT INTO {table} (email, name, password, {address}) VALUES ($1, $2, $3, $4) \
             RETURNING id, email, name, password, {address}"
        );

        let row: PartyRow = sqlx::query_as(&sql)
            .bind(&party.email)
            .bind(&party.name)
            .bind(&party.credential_hash)
            .bind(&party.address)
            .fetch_one(&self.pool)
            .await?;

        Ok(self.party(row))
    }

    async fn get_by_email(&self, email: &str) -> Result<Party, StoreError> {
        let (table, address) = self.table();
        let sql = format!("SELECT id, email, name, password, {address} FROM {table} WHERE email = $1");

        let row: Option<PartyRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| self.party(row)).ok_or(StoreError::NotFound)
    }
}
