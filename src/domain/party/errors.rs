use crate::auth::AuthError;
use crate::domain::{ErrorKind, StoreError};

// ============================================================================
// Party Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PartyError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("user with email {0} already exists")]
    EmailTaken(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("failed to access party store")]
    Persistence(#[source] StoreError),
}

impl PartyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PartyError::EmptyEmail
            | PartyError::InvalidEmail(_)
            | PartyError::EmptyName
            | PartyError::EmptyPassword => ErrorKind::Validation,
            PartyError::EmailTaken(_) => ErrorKind::Conflict,
            PartyError::InvalidCredentials => ErrorKind::Unauthorized,
            PartyError::Auth(e) => e.kind(),
            PartyError::Persistence(StoreError::Decode(_)) => ErrorKind::Internal,
            PartyError::Persistence(StoreError::Conflict(_)) => ErrorKind::Conflict,
            PartyError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
