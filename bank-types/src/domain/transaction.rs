//! Transaction domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::account::AccountId;
use super::amount::Amount;
use super::operation_type::OperationTypeId;

/// Unique identifier for a Transaction, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed monetary movement posted against an account.
///
/// Transactions are immutable once created - they represent
/// a historical record of what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub operation_type_id: OperationTypeId,
    /// Amount in minor units, never zero
    pub amount: Amount,
    /// When the movement happened
    pub event_date: DateTime<Utc>,
}

/// Input for recording a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub operation_type_id: OperationTypeId,
    pub amount: Amount,
    pub event_date: DateTime<Utc>,
}

impl NewTransaction {
    /// Creates a transaction input stamped with the current time.
    pub fn now(account_id: AccountId, operation_type_id: OperationTypeId, amount: Amount) -> Self {
        Self {
            account_id,
            operation_type_id,
            amount,
            event_date: Utc::now(),
        }
    }
}
