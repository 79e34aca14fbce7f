use rust_decimal::Decimal;

use crate::domain::{ErrorKind, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Product name cannot be empty")]
    EmptyName,

    #[error("Invalid product price: {0}")]
    InvalidPrice(Decimal),

    #[error("failed to access product store")]
    Persistence(#[source] StoreError),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::EmptyName | CatalogError::InvalidPrice(_) => ErrorKind::Validation,
            CatalogError::Persistence(StoreError::Decode(_)) => ErrorKind::Internal,
            CatalogError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
