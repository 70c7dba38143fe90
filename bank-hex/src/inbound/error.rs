//! Mapping of application errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use bank_types::{AppError, DomainError, HandlerError, InfraError};

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::Handler(HandlerError::Unknown(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Handler(HandlerError::InvalidPayload { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Handler(HandlerError::BadRequest(_)) => StatusCode::BAD_REQUEST,
            AppError::Handler(HandlerError::InvalidPathParam { .. }) => StatusCode::BAD_REQUEST,
            AppError::Domain(DomainError::AccountAlreadyExists) => StatusCode::CONFLICT,
            AppError::Domain(DomainError::OperationTypeNotFound) => StatusCode::NOT_FOUND,
            AppError::Infra(InfraError::AccountNotFound) => StatusCode::NOT_FOUND,
            AppError::Infra(InfraError::Unknown(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.0.to_response();

        if status.is_server_error() {
            tracing::error!(code = %body.code, error = %body.message, "request failed");
        } else {
            tracing::debug!(code = %body.code, error = %body.message, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        ApiError::from(err).status()
    }

    #[test]
    fn test_status_per_error_kind() {
        assert_eq!(
            status_of(HandlerError::Unknown("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(HandlerError::invalid_payload("wrong type", "amount")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(HandlerError::BadRequest("missing request body".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(HandlerError::invalid_path_param("id")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::AccountAlreadyExists),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::OperationTypeNotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(InfraError::AccountNotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(InfraError::Unknown("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
