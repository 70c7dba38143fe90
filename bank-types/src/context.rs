//! Request context.
//!
//! Carries per-request metadata explicitly down the call chain so that every
//! log line emitted while serving a request can be correlated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata about the request currently being served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Correlation id, taken from `X-Request-ID` or generated.
    pub request_id: String,
}

impl RequestContext {
    /// Creates a context for the given request id.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Creates a context with a freshly generated request id.
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = RequestContext::generate();
        let b = RequestContext::generate();
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let ctx = RequestContext::new("req-42");
        assert_eq!(ctx.request_id, "req-42");
    }
}
