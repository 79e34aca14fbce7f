use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::party::Role;
use super::identity::{AuthError, Identity, IdentityGate};

// ============================================================================
// Signed Bearer Tokens
// ============================================================================
//
// HS256 JWTs carrying {id, role, exp}. Verification pins the algorithm and
// allows no clock leeway on `exp`.
//
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: i64,
    role: Role,
    exp: i64,
}

pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::Credential("token secret cannot be empty".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            validation,
            ttl,
        })
    }

    /// Issue a token for `identity` that expires after the configured TTL.
    pub fn issue(&self, identity: Identity) -> Result<String, AuthError> {
        let claims = Claims {
            id: identity.user_id,
            role: identity.role,
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Credential(e.to_string()))
    }
}

impl IdentityGate for TokenSigner {
    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(Identity::new(data.claims.id, data.claims.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret", Duration::minutes(180)).unwrap()
    }

    #[test]
    fn test_issued_token_verifies() {
        let signer = signer();
        let token = signer.issue(Identity::new(42, Role::Seller)).unwrap();

        assert_eq!(token.split('.').count(), 3);
        let identity = signer.verify(&token).unwrap();
        assert_eq!(identity, Identity::new(42, Role::Seller));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = signer();
        let token = signer.issue(Identity::new(1, Role::Buyer)).unwrap();
        let signature = token.rsplit('.').next().unwrap();

        // Claims for a seller, signed elsewhere, spliced onto the buyer's signature
        let elsewhere = TokenSigner::new("attacker", Duration::minutes(180)).unwrap();
        let forged_token = elsewhere.issue(Identity::new(1, Role::Seller)).unwrap();
        let (forged_claims, _) = forged_token.rsplit_once('.').unwrap();
        let forged = format!("{}.{}", forged_claims, signature);

        assert!(matches!(signer.verify(&forged), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = signer().issue(Identity::new(1, Role::Buyer)).unwrap();
        let other = TokenSigner::new("another-secret", Duration::minutes(180)).unwrap();

        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = TokenSigner::new("test-secret", Duration::minutes(-1)).unwrap();
        let token = signer.issue(Identity::new(1, Role::Buyer)).unwrap();

        assert!(matches!(signer.verify(&token), Err(AuthError::Expired)));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let hs512 = encode(
            &Header::new(Algorithm::HS512),
            &Claims { id: 1, role: Role::Seller, exp: Utc::now().timestamp() + 600 },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(signer().verify(&hs512), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_garbage_rejected() {
        let signer = signer();
        assert!(matches!(signer.verify("not-a-token"), Err(AuthError::InvalidToken)));
        assert!(matches!(signer.verify("zz.zz.zz"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_empty_secret_refused() {
        assert!(TokenSigner::new(Vec::new(), Duration::minutes(1)).is_err());
    }
}
