//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod body;
mod context;
mod error;
mod handlers;
mod server;
pub mod validation;

pub use body::{FromJsonObject, JsonBody};
pub use context::Context;
pub use error::ApiError;
pub use handlers::AppState;
pub use server::HttpServer;
pub use validation::Validator;
