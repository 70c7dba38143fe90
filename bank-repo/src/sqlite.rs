//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use bank_types::{
    Account, AccountId, AccountRepository, InfraError, NewAccount, NewTransaction, OperationKind,
    OperationTypeId, RepoError, Transaction, TransactionId,
};

use crate::types::{DbAccount, DbTransaction, account_insert_error, db_error};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &SqlitePool, sql: &str, name: &str) -> anyhow::Result<()> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration and seeding.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if !in_memory {
            if let Some(path) = database_url.strip_prefix("sqlite://") {
                // Remove query parameters
                let path = path.split('?').next().unwrap_or(path);
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` opens a distinct database, so keep one.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = pool_options.connect_with(options).await?;

        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_tables.sql"),
            "0001",
        )
        .await?;

        let repo = Self { pool };
        repo.seed_operation_types().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserts the fixed operation types, ignoring rows that already exist.
    pub async fn seed_operation_types(&self) -> Result<(), RepoError> {
        for kind in OperationKind::ALL {
            sqlx::query(
                r#"INSERT INTO operation_types (id, description) VALUES (?, ?) ON CONFLICT (id) DO NOTHING"#,
            )
            .bind(kind.id().value())
            .bind(kind.description())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        }
        tracing::info!("operation types seeded");
        Ok(())
    }

    /// Loads a stored transaction.
    pub async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, RepoError> {
        let row: Option<DbTransaction> = sqlx::query_as(
            r#"SELECT id, account_id, operation_type_id, amount, event_date FROM transactions WHERE id = ?"#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(DbTransaction::into_domain))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl AccountRepository for SqliteRepo {
    async fn create_account(&self, account: NewAccount) -> Result<AccountId, RepoError> {
        let result =
            sqlx::query(r#"INSERT INTO accounts (document_number, created_at) VALUES (?, ?)"#)
                .bind(&account.document_number)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(account_insert_error)?;

        Ok(AccountId::new(result.last_insert_rowid()))
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, RepoError> {
        let row: Option<DbAccount> =
            sqlx::query_as(r#"SELECT id, document_number, created_at FROM accounts WHERE id = ?"#)
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(DbAccount::into_domain)
            .ok_or(RepoError::Infra(InfraError::AccountNotFound))
    }

    async fn has_account_by_document_number(
        &self,
        document_number: &str,
    ) -> Result<bool, RepoError> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM accounts WHERE document_number = ?"#)
                .bind(document_number)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(count > 0)
    }

    async fn has_operation_type(&self, id: OperationTypeId) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM operation_types WHERE id = ?"#)
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }

    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<TransactionId, RepoError> {
        let result = sqlx::query(
            r#"INSERT INTO transactions (account_id, operation_type_id, amount, event_date)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(transaction.account_id.value())
        .bind(transaction.operation_type_id.value())
        .bind(transaction.amount.minor_units())
        .bind(transaction.event_date)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(TransactionId::new(result.last_insert_rowid()))
    }
}
