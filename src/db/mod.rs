// ============================================================================
// Persistence Adapters - PostgreSQL via sqlx
// ============================================================================
//
// One pool is created in main and handed to each store constructor.
// `memory` holds in-process doubles for the same ports, used by tests.
//
// ============================================================================

mod order_store;
mod party_store;
mod product_store;
mod schema;

#[cfg(test)]
pub mod memory;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::utils::{wait_for, Backoff, IsTransient};

pub use order_store::PgOrderStore;
pub use party_store::PgPartyStore;
pub use product_store::PgProductStore;
pub use schema::ensure_schema;

impl IsTransient for sqlx::Error {
    fn is_transient(&self) -> bool {
        matches!(self, sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut)
    }
}

/// Open the pool, waiting for the database to accept connections.
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let url = config.database_url.as_str();
    let max_connections = config.db_max_connections;
    let backoff = Backoff::for_database(config.db_connect_attempts);
    let budget = backoff.attempts;

    wait_for("PostgreSQL", &backoff, move |attempt| {
        tracing::info!(attempt, budget, max_connections, "Opening PostgreSQL pool");
        PgPoolOptions::new().max_connections(max_connections).connect(url)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let io = sqlx::Error::Io(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"));
        assert!(io.is_transient());
        assert!(sqlx::Error::PoolTimedOut.is_transient());
        assert!(!sqlx::Error::RowNotFound.is_transient());
        assert!(!sqlx::Error::Configuration("bad url".into()).is_transient());
    }
}
