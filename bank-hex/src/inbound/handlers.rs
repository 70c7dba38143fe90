//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Map, Value};
use utoipa::OpenApi;

use bank_types::{
    AccountId, AccountRepository, AccountResponse, Amount, CreateAccountRequest, HandlerError,
    NewAccount, NewTransaction, OperationTypeId, TransactionResponse,
};

use super::body::{FromJsonObject, JsonBody, decimal_text_field, integer_field, string_field};
use super::context::Context;
use super::error::ApiError;
use super::validation::{Constraint, Validate, Validator};
use crate::AccountService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: AccountRepository> {
    pub service: AccountService<R>,
    pub validator: Validator,
}

// ─────────────────────────────────────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────────────────────────────────────

impl FromJsonObject for CreateAccountRequest {
    fn from_object(object: &Map<String, Value>) -> Result<Self, HandlerError> {
        Ok(CreateAccountRequest {
            document_number: string_field(object, "document_number")?,
        })
    }
}

impl Validate for CreateAccountRequest {
    fn constraints(&self) -> Vec<Constraint> {
        vec![Constraint::new(
            "document_number",
            &self.document_number,
            "not_empty",
        )]
    }
}

/// Decoded transaction body. `amount` stays textual until it passes validation.
#[derive(Debug)]
pub struct CreateTransactionBody {
    pub account_id: i64,
    pub operation_type_id: i64,
    pub amount: String,
}

impl FromJsonObject for CreateTransactionBody {
    fn from_object(object: &Map<String, Value>) -> Result<Self, HandlerError> {
        Ok(CreateTransactionBody {
            account_id: integer_field(object, "account_id")?,
            operation_type_id: integer_field(object, "operation_type_id")?,
            amount: decimal_text_field(object, "amount")?,
        })
    }
}

impl Validate for CreateTransactionBody {
    fn constraints(&self) -> Vec<Constraint> {
        vec![
            Constraint::new("account_id", self.account_id, "min").with_param("0"),
            Constraint::new("operation_type_id", self.operation_type_id, "min").with_param("0"),
            Constraint::new("amount", &self.amount, "not_zero"),
        ]
    }
}

impl CreateTransactionBody {
    fn into_new_transaction(self) -> Result<NewTransaction, HandlerError> {
        let zero = || HandlerError::invalid_payload("this value can't be zero", "amount");

        let major: f64 = self.amount.parse().map_err(|_| zero())?;
        let amount = Amount::from_major_units(major).ok_or_else(|| {
            HandlerError::invalid_payload("field amount is out of range", "amount")
        })?;
        // Sub-cent values truncate to nothing.
        if amount.is_zero() {
            return Err(zero());
        }

        Ok(NewTransaction::now(
            AccountId::new(self.account_id),
            OperationTypeId::new(self.operation_type_id),
            amount,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Open a new account.
#[tracing::instrument(skip_all, fields(request_id = %ctx.request_id))]
pub async fn create_account<R: AccountRepository>(
    State(state): State<Arc<AppState<R>>>,
    Context(ctx): Context,
    JsonBody(req): JsonBody<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.validator.validate(&req)?;

    let document_number = req.document_number.clone();
    let id = state
        .service
        .create_account(&ctx, NewAccount::new(req.document_number))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            id,
            document_number,
        }),
    ))
}

/// Get account by ID.
#[tracing::instrument(skip(state, ctx), fields(request_id = %ctx.request_id, account_id = %id))]
pub async fn get_account<R: AccountRepository>(
    State(state): State<Arc<AppState<R>>>,
    Context(ctx): Context,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let account_id: AccountId = id
        .parse()
        .map_err(|_| HandlerError::invalid_path_param("id"))?;

    let account = state.service.get_account(&ctx, account_id).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// Record a transaction against an account.
#[tracing::instrument(skip_all, fields(request_id = %ctx.request_id))]
pub async fn create_transaction<R: AccountRepository>(
    State(state): State<Arc<AppState<R>>>,
    Context(ctx): Context,
    JsonBody(body): JsonBody<CreateTransactionBody>,
) -> Result<impl IntoResponse, ApiError> {
    state.validator.validate(&body)?;

    let transaction = body.into_new_transaction()?;
    let id = state.service.create_transaction(&ctx, transaction).await?;

    Ok((StatusCode::CREATED, Json(TransactionResponse { id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::body::decode;

    #[test]
    fn test_transaction_body_converts_to_minor_units() {
        let body: CreateTransactionBody =
            decode(br#"{"account_id": 1, "operation_type_id": 4, "amount": 15.45}"#).unwrap();
        Validator::new().validate(&body).unwrap();

        let tx = body.into_new_transaction().unwrap();
        assert_eq!(tx.account_id, AccountId::new(1));
        assert_eq!(tx.operation_type_id, OperationTypeId::new(4));
        assert_eq!(tx.amount.minor_units(), 1545);
    }

    #[test]
    fn test_transaction_body_sub_cent_amount_is_zero() {
        let body: CreateTransactionBody =
            decode(br#"{"account_id": 1, "operation_type_id": 1, "amount": 0.004}"#).unwrap();
        Validator::new().validate(&body).unwrap();

        assert_eq!(
            body.into_new_transaction().unwrap_err(),
            HandlerError::invalid_payload("this value can't be zero", "amount")
        );
    }

    #[test]
    fn test_transaction_body_out_of_range_amount() {
        let bodies: [&[u8]; 3] = [
            br#"{"account_id": 1, "operation_type_id": 1, "amount": 1e17}"#,
            br#"{"account_id": 1, "operation_type_id": 1, "amount": -1e300}"#,
            br#"{"account_id": 1, "operation_type_id": 1, "amount": "1e300"}"#,
        ];
        for raw in bodies {
            let body: CreateTransactionBody = decode(raw).unwrap();
            Validator::new().validate(&body).unwrap();

            assert_eq!(
                body.into_new_transaction().unwrap_err(),
                HandlerError::invalid_payload("field amount is out of range", "amount")
            );
        }
    }

    #[test]
    fn test_transaction_body_missing_amount_fails_not_zero() {
        let body: CreateTransactionBody =
            decode(br#"{"account_id": 1, "operation_type_id": 1}"#).unwrap();

        assert_eq!(
            Validator::new().validate(&body).unwrap_err(),
            HandlerError::invalid_payload("this value can't be zero", "amount")
        );
    }

    #[test]
    fn test_account_body_missing_document_fails_not_empty() {
        let req: CreateAccountRequest = decode(b"{}").unwrap();

        assert_eq!(
            Validator::new().validate(&req).unwrap_err(),
            HandlerError::invalid_payload("field document_number cannot be empty", "document_number")
        );
    }
}
