use std::sync::Arc;

use crate::auth::{AuthError, CredentialHasher, Identity, TokenSigner};
use crate::domain::StoreError;
use super::errors::PartyError;
use super::model::{NewParty, Party, Role};
use super::ports::PartyStore;

// ============================================================================
// Party Service - Registration and Login
// ============================================================================

#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
    pub address: String,
}

pub struct PartyService {
    store: Arc<dyn PartyStore>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<TokenSigner>,
}

impl PartyService {
    pub fn new(
        store: Arc<dyn PartyStore>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<TokenSigner>,
    ) -> Self {
        Self { store, hasher, tokens }
    }

    pub fn role(&self) -> Role {
        self.store.role()
    }

    pub async fn register(&self, registration: Registration) -> Result<Party, PartyError> {
        validate_registration(&registration)?;

        match self.store.get_by_email(&registration.email).await {
            Ok(existing) => {
                tracing::warn!(
                    role = %self.role(),
                    party_id = existing.id,
                    "Registration rejected, email already in use"
                );
                return Err(PartyError::EmailTaken(registration.email));
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(PartyError::Persistence(e)),
        }

        // The read above can race another registration; the store's unique
        // email constraint is the authority.
        let email = registration.email.clone();
        let credential_hash = self.hash_password(registration.password.clone()).await?;
        let party = self
            .store
            .store(NewParty {
                email: registration.email,
                name: registration.name,
                credential_hash,
                address: registration.address,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(constraint) => {
                    tracing::warn!(role = %self.role(), constraint = %constraint, "Registration lost email race");
                    PartyError::EmailTaken(email)
                }
                other => PartyError::Persistence(other),
            })?;

        tracing::info!(role = %party.role, party_id = party.id, "✅ Party registered");
        Ok(party)
    }

    /// Check credentials and issue a bearer token for the party.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Party, String), PartyError> {
        let party = match self.store.get_by_email(email).await {
            Ok(party) => party,
            Err(e) if e.is_not_found() => return Err(PartyError::InvalidCredentials),
            Err(e) => return Err(PartyError::Persistence(e)),
        };

        if !self.check_password(password.to_string(), party.credential_hash.clone()).await? {
            tracing::warn!(role = %party.role, party_id = party.id, "Login rejected");
            return Err(PartyError::InvalidCredentials);
        }

        let token = self.tokens.issue(Identity::new(party.id, party.role))?;
        tracing::info!(role = %party.role, party_id = party.id, "Party logged in");

        Ok((party, token))
    }
}

impl PartyService {
    // bcrypt is CPU bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, PartyError> {
        let hasher = self.hasher.clone();
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Credential(e.to_string()))??;
        Ok(hashed)
    }

    async fn check_password(&self, password: String, stored: String) -> Result<bool, PartyError> {
        let hasher = self.hasher.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| AuthError::Credential(e.to_string()))?;
        Ok(matches)
    }
}

fn validate_registration(registration: &Registration) -> Result<(), PartyError> {
    let email = registration.email.trim();
    if email.is_empty() {
        return Err(PartyError::EmptyEmail);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(PartyError::InvalidEmail(registration.email.clone())),
    }
    if registration.name.trim().is_empty() {
        return Err(PartyError::EmptyName);
    }
    if registration.password.is_empty() {
        return Err(PartyError::EmptyPassword);
    }
    Ok(())
}
