//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use bank_types::{
    Account, AccountId, AccountRepository, InfraError, NewAccount, NewTransaction, OperationKind,
    OperationTypeId, RepoError, Transaction, TransactionId,
};

use crate::types::{DbAccount, DbTransaction, account_insert_error, db_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
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

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tables_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Connects, migrates and seeds the operation type catalog.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        run_migrations(&pool).await?;

        let repo = Self { pool };
        repo.seed_operation_types().await?;
        Ok(repo)
    }

    /// Inserts the fixed operation types, ignoring rows that already exist.
    pub async fn seed_operation_types(&self) -> Result<(), RepoError> {
        for kind in OperationKind::ALL {
            sqlx::query(
                r#"INSERT INTO operation_types (id, description) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING"#,
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
            r#"SELECT id, account_id, operation_type_id, amount, event_date FROM transactions WHERE id = $1"#,
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
impl AccountRepository for PostgresRepo {
    async fn create_account(&self, account: NewAccount) -> Result<AccountId, RepoError> {
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO accounts (document_number, created_at) VALUES ($1, $2) RETURNING id"#,
        )
        .bind(&account.document_number)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(account_insert_error)?;

        Ok(AccountId::new(id))
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, RepoError> {
        let row: Option<DbAccount> = sqlx::query_as(
            r#"SELECT id, document_number, created_at FROM accounts WHERE id = $1"#,
        )
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
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM accounts WHERE document_number = $1"#)
                .bind(document_number)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(count > 0)
    }

    async fn has_operation_type(&self, id: OperationTypeId) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM operation_types WHERE id = $1"#)
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
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO transactions (account_id, operation_type_id, amount, event_date)
               VALUES ($1, $2, $3, $4) RETURNING id"#,
        )
        .bind(transaction.account_id.value())
        .bind(transaction.operation_type_id.value())
        .bind(transaction.amount.minor_units())
        .bind(transaction.event_date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(TransactionId::new(id))
    }
}
