//! Account Application Service
//!
//! Orchestrates domain operations through the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use bank_types::{
    Account, AccountId, AccountRepository, AppError, DomainError, NewAccount, NewTransaction,
    RequestContext, TransactionId,
};

/// Application service for account and transaction use-cases.
///
/// Generic over `R: AccountRepository` - the adapter is injected at compile time,
/// so tests run against an in-memory double and production against SQL.
pub struct AccountService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    /// Creates a new account service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Account Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens an account for a document number that is not yet registered.
    ///
    /// The existence check is advisory; a concurrent duplicate is still
    /// rejected by the storage unique constraint.
    #[tracing::instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn create_account(
        &self,
        ctx: &RequestContext,
        account: NewAccount,
    ) -> Result<AccountId, AppError> {
        let exists = self
            .repo
            .has_account_by_document_number(&account.document_number)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "document lookup failed"))?;

        if exists {
            tracing::warn!("account already exists");
            return Err(DomainError::AccountAlreadyExists.into());
        }

        let id = self
            .repo
            .create_account(account)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "account insert failed"))?;

        tracing::info!(account_id = %id, "account created");
        Ok(id)
    }

    /// Loads an account; a missing id surfaces as `infra.2`.
    #[tracing::instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn get_account(
        &self,
        ctx: &RequestContext,
        id: AccountId,
    ) -> Result<Account, AppError> {
        self.repo
            .get_account(id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "account lookup failed"))
            .map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transaction Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a transaction against an existing account.
    #[tracing::instrument(
        skip(self, ctx, transaction),
        fields(
            request_id = %ctx.request_id,
            account_id = %transaction.account_id,
            operation_type_id = %transaction.operation_type_id,
        )
    )]
    pub async fn create_transaction(
        &self,
        ctx: &RequestContext,
        transaction: NewTransaction,
    ) -> Result<TransactionId, AppError> {
        self.get_account(ctx, transaction.account_id).await?;

        let known = self
            .repo
            .has_operation_type(transaction.operation_type_id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "operation type lookup failed"))?;

        if !known {
            tracing::warn!("operation type doesn't exist");
            return Err(DomainError::OperationTypeNotFound.into());
        }

        let id = self
            .repo
            .create_transaction(transaction)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "transaction insert failed"))?;

        tracing::info!(transaction_id = %id, "transaction created");
        Ok(id)
    }
}
