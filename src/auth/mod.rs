// ============================================================================
// Auth - Identity/Role Gate and Credentials
// ============================================================================
//
// - identity: Identity {user_id, role}, the IdentityGate trait, AuthError
// - token:    HS256 JWT bearer tokens (TokenSigner issues and verifies)
// - password: CredentialHasher seam (bcrypt) used by registration and login
//
// ============================================================================

mod identity;
mod password;
mod token;

pub use identity::{bearer_token, AuthError, Identity, IdentityGate};
pub use password::{BcryptHasher, CredentialHasher};
pub use token::TokenSigner;
