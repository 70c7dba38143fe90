//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for an Account, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Wraps a storage-assigned identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error parsing an [`AccountId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid account id: {0:?}")]
pub struct ParseAccountIdError(String);

impl std::str::FromStr for AccountId {
    type Err = ParseAccountIdError;

    /// Accepts unsigned decimal integers only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .ok()
            .and_then(|v| i64::try_from(v).ok())
            .map(Self)
            .ok_or_else(|| ParseAccountIdError(s.to_string()))
    }
}

/// A ledger account, identified by a unique document number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Holder's document number, unique across all accounts
    pub document_number: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates an account with all fields specified (for database reconstruction).
    pub fn from_parts(id: AccountId, document_number: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            document_number,
            created_at,
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub document_number: String,
}

impl NewAccount {
    pub fn new(document_number: impl Into<String>) -> Self {
        Self {
            document_number: document_number.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_id() {
        assert_eq!("1".parse::<AccountId>().unwrap(), AccountId::new(1));
        assert_eq!("0".parse::<AccountId>().unwrap(), AccountId::new(0));
        assert_eq!("1398".parse::<AccountId>().unwrap().value(), 1398);
    }

    #[test]
    fn test_parse_account_id_rejects_garbage() {
        assert!("abc".parse::<AccountId>().is_err());
        assert!("-1".parse::<AccountId>().is_err());
        assert!("1.5".parse::<AccountId>().is_err());
        assert!("".parse::<AccountId>().is_err());
        assert!("18446744073709551615".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_account_id_serializes_as_number() {
        let json = serde_json::to_string(&AccountId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
