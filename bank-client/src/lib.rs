//! # Bank Client SDK
//!
//! A typed Rust client for the Bank Ledger API.

use bank_types::{
    AccountId, AccountResponse, CreateAccountRequest, CreateTransactionRequest, ErrorCode,
    ErrorResponse, OperationTypeId, TransactionResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} {code:?} - {message}")]
    Api {
        status: u16,
        /// Stable error code, when the body carried one
        code: Option<ErrorCode>,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Error code reported by the server, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => *code,
            _ => None,
        }
    }
}

/// Bank Ledger API client.
pub struct BankClient {
    base_url: String,
    http: Client,
}

impl BankClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Opens an account for a document number.
    pub async fn create_account(
        &self,
        document_number: &str,
    ) -> Result<AccountResponse, ClientError> {
        let req = CreateAccountRequest {
            document_number: document_number.to_string(),
        };
        self.post("/api/v1/accounts", &req).await
    }

    /// Gets an account by ID.
    pub async fn get_account(&self, id: AccountId) -> Result<AccountResponse, ClientError> {
        self.get(&format!("/api/v1/accounts/{}", id)).await
    }

    /// Records a transaction. `amount` is in currency units.
    pub async fn create_transaction(
        &self,
        account_id: AccountId,
        operation_type_id: OperationTypeId,
        amount: f64,
    ) -> Result<TransactionResponse, ClientError> {
        let req = CreateTransactionRequest {
            account_id,
            operation_type_id,
            amount,
        };
        self.post("/api/v1/accounts/transaction", &req).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        handle_response(resp).await
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), body))
    }
}

/// Builds an [`ClientError::Api`] from a failed response body.
fn api_error(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => ClientError::Api {
            status,
            code: Some(err.code),
            message: err.message,
        },
        Err(_) => ClientError::Api {
            status,
            code: None,
            message: body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BankClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = BankClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_api_error_parses_error_body() {
        let err = api_error(
            409,
            r#"{"code":"domain.1","message":"account already exists"}"#.to_string(),
        );

        assert_eq!(err.code(), Some(ErrorCode::DomainAccountAlreadyExists));
        match err {
            ClientError::Api { status, message, .. } => {
                assert_eq!(status, 409);
                assert_eq!(message, "account already exists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_keeps_unstructured_body() {
        let err = api_error(502, "Bad Gateway".to_string());

        assert_eq!(err.code(), None);
        assert!(err.to_string().contains("Bad Gateway"));
    }
}
