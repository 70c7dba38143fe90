//! HTTP Server configuration and startup.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request, Response},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use bank_types::AccountRepository;

use super::context::REQUEST_ID_HEADER;
use super::handlers::{self, AppState};
use super::validation::Validator;
use crate::AccountService;

/// HTTP Server for the Bank Ledger API.
pub struct HttpServer<R: AccountRepository> {
    state: Arc<AppState<R>>,
}

impl<R: AccountRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service and the standard rules.
    pub fn new(service: AccountService<R>) -> Self {
        Self::with_validator(service, Validator::new())
    }

    /// Creates a new HTTP server with a custom validator.
    pub fn with_validator(service: AccountService<R>, validator: Validator) -> Self {
        Self {
            state: Arc::new(AppState { service, validator }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        let trace = TraceLayer::new_for_http()
            .make_span_with(|req: &Request<Body>| {
                let request_id = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request_id,
                )
            })
            .on_response(|res: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = res.status().as_u16(),
                    latency_ms = latency.as_millis() as u64,
                    "response sent"
                );
            });

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/api/v1/accounts", post(handlers::create_account::<R>))
            .route("/api/v1/accounts/{id}", get(handlers::get_account::<R>))
            .route(
                "/api/v1/accounts/transaction",
                post(handlers::create_transaction::<R>),
            )
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                    .layer(trace)
                    .layer(PropagateRequestIdLayer::new(request_id)),
            )
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
