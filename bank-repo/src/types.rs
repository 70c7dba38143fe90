//! Shared database row types and error mapping for the SQL adapters.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use bank_types::{
    Account, AccountId, Amount, DomainError, InfraError, OperationTypeId, RepoError, Transaction,
    TransactionId,
};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Account row from database.
#[derive(FromRow)]
pub struct DbAccount {
    pub id: i64,
    pub document_number: String,
    pub created_at: DateTime<Utc>,
}

impl DbAccount {
    pub fn into_domain(self) -> Account {
        Account::from_parts(AccountId::new(self.id), self.document_number, self.created_at)
    }
}

/// Transaction row from database.
#[derive(FromRow)]
pub struct DbTransaction {
    pub id: i64,
    pub account_id: i64,
    pub operation_type_id: i64,
    pub amount: i64,
    pub event_date: DateTime<Utc>,
}

impl DbTransaction {
    pub fn into_domain(self) -> Transaction {
        Transaction {
            id: TransactionId::new(self.id),
            account_id: AccountId::new(self.account_id),
            operation_type_id: OperationTypeId::new(self.operation_type_id),
            amount: Amount::from_minor_units(self.amount),
            event_date: self.event_date,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Any driver failure we have no better classification for.
pub fn db_error(err: sqlx::Error) -> RepoError {
    RepoError::Infra(InfraError::Unknown(err.to_string()))
}

/// Maps a failed account insert; the unique constraint on the document number
/// is the final authority on duplicates.
pub fn account_insert_error(err: sqlx::Error) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Domain(DomainError::AccountAlreadyExists)
        }
        _ => db_error(err),
    }
}
