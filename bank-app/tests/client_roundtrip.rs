//! End-to-end tests: real server on a local port, driven through the client SDK.
//!
//! This test requires the `sqlite` feature flag.

#![cfg(feature = "sqlite")]

use bank_client::{BankClient, ClientError};
use bank_hex::{AccountService, inbound::HttpServer};
use bank_repo::build_repo;
use bank_types::{AccountId, AccountRepository, ErrorCode, NewAccount, OperationKind};

/// Starts a server on an ephemeral port and returns its base URL.
async fn spawn_server(database_url: &str) -> String {
    let repo = build_repo(database_url).await.unwrap();
    let router = HttpServer::new(AccountService::new(repo)).router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_client_against_live_server() {
    let client = BankClient::new(spawn_server("sqlite::memory:").await);

    assert!(client.health().await.unwrap());

    let account = client.create_account("12345678900").await.unwrap();
    assert_eq!(account.id, AccountId::new(1));
    assert_eq!(account.document_number, "12345678900");

    let fetched = client.get_account(account.id).await.unwrap();
    assert_eq!(fetched, account);

    let tx = client
        .create_transaction(account.id, OperationKind::Withdrawal.id(), -50.0)
        .await
        .unwrap();
    assert_eq!(tx.id.value(), 1);
}

#[tokio::test]
async fn test_client_surfaces_error_codes() {
    let client = BankClient::new(spawn_server("sqlite::memory:").await);

    client.create_account("10").await.unwrap();
    let err = client.create_account("10").await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::DomainAccountAlreadyExists));
    assert!(matches!(err, ClientError::Api { status: 409, .. }));

    let err = client.get_account(AccountId::new(1398)).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InfraAccountNotFound));

    let err = client
        .create_transaction(AccountId::new(1), OperationKind::Payment.id(), 0.0)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::HandlerInvalidPayload));
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}/nested/bank.db", dir.path().display());

    {
        let repo = build_repo(&url).await.unwrap();
        repo.create_account(NewAccount::new("777")).await.unwrap();
    }

    let repo = build_repo(&url).await.unwrap();
    assert!(repo.has_account_by_document_number("777").await.unwrap());
    for kind in OperationKind::ALL {
        assert!(repo.has_operation_type(kind.id()).await.unwrap());
    }
}
