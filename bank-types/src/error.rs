//! Error taxonomy for the ledger service.
//!
//! Errors are split in three tiers, each one a closed set with a stable
//! machine-readable [`ErrorCode`]:
//!
//! - [`HandlerError`] - request decoding and field validation (`handler.N`)
//! - [`DomainError`] - business rule violations (`domain.N`)
//! - [`InfraError`] - storage failures (`infra.N`)
//!
//! The codes are part of the wire contract and must never be renumbered.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable error codes exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ErrorCode {
    #[serde(rename = "handler.1")]
    HandlerUnknown,
    #[serde(rename = "handler.2")]
    HandlerInvalidPayload,
    #[serde(rename = "handler.3")]
    HandlerBadRequest,
    #[serde(rename = "handler.4")]
    HandlerInvalidPathParam,
    #[serde(rename = "domain.1")]
    DomainAccountAlreadyExists,
    #[serde(rename = "domain.2")]
    DomainOperationTypeNotFound,
    #[serde(rename = "infra.1")]
    InfraUnknown,
    #[serde(rename = "infra.2")]
    InfraAccountNotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::HandlerUnknown => "handler.1",
            ErrorCode::HandlerInvalidPayload => "handler.2",
            ErrorCode::HandlerBadRequest => "handler.3",
            ErrorCode::HandlerInvalidPathParam => "handler.4",
            ErrorCode::DomainAccountAlreadyExists => "domain.1",
            ErrorCode::DomainOperationTypeNotFound => "domain.2",
            ErrorCode::InfraUnknown => "infra.1",
            ErrorCode::InfraAccountNotFound => "infra.2",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-shape errors raised at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    Unknown(String),

    #[error("{message}")]
    InvalidPayload { message: String, field: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("invalid path parameter")]
    InvalidPathParam { parameter: String },
}

impl HandlerError {
    pub fn invalid_payload(message: impl Into<String>, field: impl Into<String>) -> Self {
        HandlerError::InvalidPayload {
            message: message.into(),
            field: field.into(),
        }
    }

    pub fn invalid_path_param(parameter: impl Into<String>) -> Self {
        HandlerError::InvalidPathParam {
            parameter: parameter.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            HandlerError::Unknown(_) => ErrorCode::HandlerUnknown,
            HandlerError::InvalidPayload { .. } => ErrorCode::HandlerInvalidPayload,
            HandlerError::BadRequest(_) => ErrorCode::HandlerBadRequest,
            HandlerError::InvalidPathParam { .. } => ErrorCode::HandlerInvalidPathParam,
        }
    }
}

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("account already exists")]
    AccountAlreadyExists,

    #[error("operation type doesn't exist")]
    OperationTypeNotFound,
}

impl DomainError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::AccountAlreadyExists => ErrorCode::DomainAccountAlreadyExists,
            DomainError::OperationTypeNotFound => ErrorCode::DomainOperationTypeNotFound,
        }
    }
}

/// Infrastructure-level errors (data access failures).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InfraError {
    #[error("{0}")]
    Unknown(String),

    #[error("account not found")]
    AccountNotFound,
}

impl InfraError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InfraError::Unknown(_) => ErrorCode::InfraUnknown,
            InfraError::AccountNotFound => ErrorCode::InfraAccountNotFound,
        }
    }
}

/// Errors returned by repository adapters.
///
/// Adapters report storage failures as [`InfraError`], but may also surface a
/// [`DomainError`] when the store itself enforces the rule (e.g. the unique
/// constraint on the document number).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

/// Application-level errors: the closed union of every tier.
///
/// Maps cleanly to HTTP status codes at the inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => AppError::Domain(e),
            RepoError::Infra(e) => AppError::Infra(e),
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Handler(e) => e.code(),
            AppError::Domain(e) => e.code(),
            AppError::Infra(e) => e.code(),
        }
    }

    /// Builds the flat JSON body sent to clients.
    pub fn to_response(&self) -> ErrorResponse {
        let (field, parameter) = match self {
            AppError::Handler(HandlerError::InvalidPayload { field, .. }) => {
                (Some(field.clone()), None)
            }
            AppError::Handler(HandlerError::InvalidPathParam { parameter }) => {
                (None, Some(parameter.clone()))
            }
            _ => (None, None),
        };

        ErrorResponse {
            code: self.code(),
            message: self.to_string(),
            field,
            parameter,
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable code
    #[schema(value_type = String, example = "domain.1")]
    pub code: ErrorCode,
    /// Human-readable message
    #[schema(example = "account already exists")]
    pub message: String,
    /// Offending body field, for payload errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Offending path parameter, for path errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(HandlerError::Unknown("x".into()).code().as_str(), "handler.1");
        assert_eq!(
            HandlerError::invalid_payload("m", "f").code().as_str(),
            "handler.2"
        );
        assert_eq!(
            HandlerError::BadRequest("x".into()).code().as_str(),
            "handler.3"
        );
        assert_eq!(
            HandlerError::invalid_path_param("id").code().as_str(),
            "handler.4"
        );
        assert_eq!(DomainError::AccountAlreadyExists.code().as_str(), "domain.1");
        assert_eq!(DomainError::OperationTypeNotFound.code().as_str(), "domain.2");
        assert_eq!(InfraError::Unknown("x".into()).code().as_str(), "infra.1");
        assert_eq!(InfraError::AccountNotFound.code().as_str(), "infra.2");
    }

    #[test]
    fn test_repo_error_passes_through_unchanged() {
        let app: AppError = RepoError::from(InfraError::AccountNotFound).into();
        assert_eq!(app, AppError::Infra(InfraError::AccountNotFound));

        let app: AppError = RepoError::from(DomainError::AccountAlreadyExists).into();
        assert_eq!(app, AppError::Domain(DomainError::AccountAlreadyExists));
    }

    #[test]
    fn test_domain_error_body() {
        let body = AppError::from(DomainError::AccountAlreadyExists).to_response();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "domain.1", "message": "account already exists"})
        );
    }

    #[test]
    fn test_invalid_payload_body_carries_field() {
        let body = AppError::from(HandlerError::invalid_payload(
            "this value can't be zero",
            "amount",
        ))
        .to_response();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "handler.2",
                "message": "this value can't be zero",
                "field": "amount"
            })
        );
    }

    #[test]
    fn test_path_param_body_carries_parameter() {
        let body = AppError::from(HandlerError::invalid_path_param("id")).to_response();
        assert_eq!(body.parameter.as_deref(), Some("id"));
        assert_eq!(body.field, None);
        assert_eq!(body.message, "invalid path parameter");
    }

    #[test]
    fn test_infra_unknown_keeps_original_message() {
        let err = AppError::from(InfraError::Unknown("connection refused".into()));
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.code(), ErrorCode::InfraUnknown);
    }
}
