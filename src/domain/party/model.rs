use serde::{Deserialize, Serialize};

// ============================================================================
// Party Model - Buyers and Sellers
// ============================================================================

/// Which side of the marketplace a party (and a caller) is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered buyer or seller. `address` is the sending address for a
/// buyer and the pick-up address for a seller.
#[derive(Debug, Clone, PartialEq)]
pub struct Party {
    pub id: i64,
    pub role: Role,
    pub email: String,
    pub name: String,
    pub credential_hash: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct NewParty {
    pub email: String,
    pub name: String,
    pub credential_hash: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Buyer).unwrap(), "\"buyer\"");
        let role: Role = serde_json::from_str("\"seller\"").unwrap();
        assert_eq!(role, Role::Seller);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Seller.to_string(), "seller");
    }
}
