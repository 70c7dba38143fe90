//! JSON request body extraction.
//!
//! Bodies are decoded in two steps: the raw bytes must be a JSON object, then
//! each field is pulled out by the request type itself so that a field with
//! the wrong JSON type can be reported by name. Absent or `null` fields take
//! their zero value and are left to the validation rules.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use bank_types::HandlerError;

use super::error::ApiError;

pub const MISSING_BODY: &str = "missing request body";
pub const INVALID_BODY: &str = "invalid request body";
pub const WRONG_TYPE: &str = "wrong type";

/// A request type that can be built from a decoded JSON object.
pub trait FromJsonObject: Sized {
    fn from_object(object: &Map<String, Value>) -> Result<Self, HandlerError>;
}

/// Extractor for JSON bodies that reports failures in the API error format.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: FromJsonObject,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e.body_text(), "failed to read request body");
            HandlerError::BadRequest(INVALID_BODY.into())
        })?;

        Ok(JsonBody(decode(&bytes)?))
    }
}

/// Decodes a raw body into `T`.
pub fn decode<T: FromJsonObject>(bytes: &[u8]) -> Result<T, HandlerError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(HandlerError::BadRequest(MISSING_BODY.into()));
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(object)) => T::from_object(&object),
        _ => Err(HandlerError::BadRequest(INVALID_BODY.into())),
    }
}

fn present<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|v| !v.is_null())
}

fn wrong_type(name: &str) -> HandlerError {
    HandlerError::invalid_payload(WRONG_TYPE, name)
}

/// A string field; absent means empty.
pub fn string_field(object: &Map<String, Value>, name: &str) -> Result<String, HandlerError> {
    match present(object, name) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(wrong_type(name)),
    }
}

/// An integer field; absent means zero. Fractions and out-of-range numbers
/// are the wrong type.
pub fn integer_field(object: &Map<String, Value>, name: &str) -> Result<i64, HandlerError> {
    match present(object, name) {
        None => Ok(0),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| wrong_type(name)),
        Some(_) => Err(wrong_type(name)),
    }
}

/// A decimal field kept in its textual form so that rules can inspect it.
/// Accepts a JSON number or a string; absent means `"0"`.
pub fn decimal_text_field(object: &Map<String, Value>, name: &str) -> Result<String, HandlerError> {
    match present(object, name) {
        None => Ok("0".to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err(wrong_type(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Sample {
        name: String,
        count: i64,
        amount: String,
    }

    impl FromJsonObject for Sample {
        fn from_object(object: &Map<String, Value>) -> Result<Self, HandlerError> {
            Ok(Sample {
                name: string_field(object, "name")?,
                count: integer_field(object, "count")?,
                amount: decimal_text_field(object, "amount")?,
            })
        }
    }

    #[test]
    fn test_empty_body_is_missing() {
        assert_eq!(
            decode::<Sample>(b"").unwrap_err(),
            HandlerError::BadRequest(MISSING_BODY.into())
        );
        assert_eq!(
            decode::<Sample>(b"  \n").unwrap_err(),
            HandlerError::BadRequest(MISSING_BODY.into())
        );
    }

    #[test]
    fn test_malformed_or_non_object_is_invalid() {
        let bodies: [&[u8]; 4] = [b"{", b"[1,2]", b"\"text\"", b"42"];
        for body in bodies {
            assert_eq!(
                decode::<Sample>(body).unwrap_err(),
                HandlerError::BadRequest(INVALID_BODY.into())
            );
        }
    }

    #[test]
    fn test_missing_fields_take_zero_values() {
        let sample: Sample = decode(b"{}").unwrap();
        assert_eq!(
            sample,
            Sample {
                name: String::new(),
                count: 0,
                amount: "0".into()
            }
        );

        let sample: Sample = decode(br#"{"name": null}"#).unwrap();
        assert_eq!(sample.name, "");
    }

    #[test]
    fn test_wrong_type_names_the_field() {
        assert_eq!(
            decode::<Sample>(br#"{"name": 10}"#).unwrap_err(),
            HandlerError::invalid_payload(WRONG_TYPE, "name")
        );
        assert_eq!(
            decode::<Sample>(br#"{"count": "1"}"#).unwrap_err(),
            HandlerError::invalid_payload(WRONG_TYPE, "count")
        );
        assert_eq!(
            decode::<Sample>(br#"{"count": 1.5}"#).unwrap_err(),
            HandlerError::invalid_payload(WRONG_TYPE, "count")
        );
        assert_eq!(
            decode::<Sample>(br#"{"amount": true}"#).unwrap_err(),
            HandlerError::invalid_payload(WRONG_TYPE, "amount")
        );
    }

    #[test]
    fn test_decimal_accepts_number_or_string() {
        let sample: Sample = decode(br#"{"amount": -15.45}"#).unwrap();
        assert_eq!(sample.amount, "-15.45");

        let sample: Sample = decode(br#"{"amount": "abc"}"#).unwrap();
        assert_eq!(sample.amount, "abc");
    }
}
