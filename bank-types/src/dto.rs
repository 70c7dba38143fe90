//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Account, AccountId, OperationTypeId, TransactionId};

// ─────────────────────────────────────────────────────────────────────────────
// Account DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Holder's document number
    #[schema(example = "12345678900")]
    #[serde(default)]
    pub document_number: String,
}

/// Account representation returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    /// Unique account identifier
    #[schema(value_type = u64, example = 1)]
    pub id: AccountId,
    /// Holder's document number
    #[schema(example = "12345678900")]
    pub document_number: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            document_number: account.document_number,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a transaction against an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Target account ID
    #[schema(value_type = u64, example = 1)]
    pub account_id: AccountId,
    /// Operation type ID (1 cash purchase, 2 installment purchase, 3 withdrawal, 4 payment)
    #[schema(value_type = u64, example = 1)]
    pub operation_type_id: OperationTypeId,
    /// Amount in major currency units; negative for debits, never zero
    #[schema(example = json!(-50.0))]
    pub amount: f64,
}

/// Response after recording a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    /// Unique transaction identifier
    #[schema(value_type = u64, example = 1)]
    pub id: TransactionId,
}
