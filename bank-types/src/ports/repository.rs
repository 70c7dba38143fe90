//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory test doubles) implement this trait.

use crate::domain::{
    Account, AccountId, NewAccount, NewTransaction, OperationTypeId, TransactionId,
};
use crate::error::RepoError;

/// Persistence contract required by the account use-case.
///
/// Every method is a single round trip to storage; the port makes no promise
/// of atomicity across calls. Identifiers are always assigned by the store.
#[async_trait::async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Accounts
    // ─────────────────────────────────────────────────────────────────────────────

    /// Inserts an account and returns its storage-assigned id.
    ///
    /// A unique-constraint violation on the document number is reported as
    /// `DomainError::AccountAlreadyExists`.
    async fn create_account(&self, account: NewAccount) -> Result<AccountId, RepoError>;

    /// Loads an account, failing with `InfraError::AccountNotFound` when absent.
    async fn get_account(&self, id: AccountId) -> Result<Account, RepoError>;

    /// Returns whether an account with this document number is already stored.
    async fn has_account_by_document_number(&self, document_number: &str)
    -> Result<bool, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Operation types & transactions
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns whether the operation type exists.
    async fn has_operation_type(&self, id: OperationTypeId) -> Result<bool, RepoError>;

    /// Inserts a transaction and returns its storage-assigned id.
    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<TransactionId, RepoError>;
}
