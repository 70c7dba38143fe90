//! Request context extraction.

use axum::{extract::FromRequestParts, http::request::Parts};
use bank_types::RequestContext;

use super::error::ApiError;

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extracts the [`RequestContext`] for the current request.
///
/// The id is normally set by the request-id layer; a request that bypassed it
/// gets a fresh one.
pub struct Context(pub RequestContext);

impl<S: Send + Sync> FromRequestParts<S> for Context {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(RequestContext::new)
            .unwrap_or_else(RequestContext::generate);

        Ok(Context(ctx))
    }
}
