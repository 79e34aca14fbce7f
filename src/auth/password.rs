use super::identity::AuthError;

/// Hashes and checks party credentials. Registration stores only the output
/// of `hash`; login calls `verify` against it.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Adaptive bcrypt hashing. The salt and cost are embedded in the stored
/// `$2b$` string, so `verify` needs nothing but the stored value.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost).map_err(|e| AuthError::Credential(e.to_string()))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        // Malformed stored values fail closed
        bcrypt::verify(password, stored).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4 /* bcrypt minimum cost */)
    }

    #[test]
    fn test_hash_verifies_own_password() {
        let hasher = hasher();
        let stored = hasher.hash("hunter2").unwrap();

        assert!(hasher.verify("hunter2", &stored));
        assert!(!hasher.verify("hunter3", &stored));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let stored = hasher().hash("plain-secret").unwrap();
        assert!(!stored.contains("plain-secret"));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let hasher = hasher();
        assert_ne!(hasher.hash("pw").unwrap(), hasher.hash("pw").unwrap());
    }

    #[test]
    fn test_malformed_stored_value_fails_closed() {
        let hasher = hasher();
        assert!(!hasher.verify("pw", ""));
        assert!(!hasher.verify("pw", "no-separator"));
        assert!(!hasher.verify("pw", "zz$zz"));
    }

    #[test]
    fn test_cost_is_recorded_in_hash() {
        let stored = hasher().hash("pw").unwrap();
        assert!(stored.starts_with("$2b$04$"), "unexpected hash prefix: {stored}");

        // Hashes made at another cost still verify
        let stronger = BcryptHasher::new(5).hash("pw").unwrap();
        assert!(hasher().verify("pw", &stronger));
    }

    #[test]
    fn test_default_uses_adaptive_cost() {
        assert_eq!(BcryptHasher::default().cost, bcrypt::DEFAULT_COST);
    }
}
