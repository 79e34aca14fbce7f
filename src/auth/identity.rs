use crate::domain::party::Role;
use crate::domain::ErrorKind;

// ============================================================================
// Identity / Role Gate
// ============================================================================

/// A verified caller: who they are and which side of the marketplace they
/// act for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Reject the caller unless it acts with `role`.
    pub fn require(&self, role: Role) -> Result<(), AuthError> {
        if self.role != role {
            return Err(AuthError::RoleNotAllowed {
                user_id: self.user_id,
                role: self.role,
                required: role,
            });
        }
        Ok(())
    }
}

/// Turns a presented bearer credential into a verified identity.
pub trait IdentityGate: Send + Sync {
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing or malformed bearer token")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    Expired,

    #[error("{role} {user_id} is not authorized, {required} role required")]
    RoleNotAllowed {
        user_id: i64,
        role: Role,
        required: Role,
    },

    #[error("caller {caller} cannot act for {claimed}")]
    IdentityMismatch { caller: i64, claimed: i64 },

    #[error("credential processing failed: {0}")]
    Credential(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Credential(_) => ErrorKind::Internal,
            _ => ErrorKind::Unauthorized,
        }
    }
}

/// Extract the token from an `Authorization` header value. The scheme is
/// matched case-insensitively.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AuthError::MissingToken),
    }
}
