//! JSON decoding for plain and error-enveloped responses
//!
//! Mutating endpoints answer HTTP 200 even when they refuse the request and
//! put `error` / `errorDescription` into the body instead. Those responses
//! decode into [`Outcome`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Outcome, Rejection};

const ERROR_CODE_FIELD: &str = "error";
const ERROR_DESCRIPTION_FIELDS: &[&str] = &["errorDescription", "error_description"];

/// Decode a response body that has no error envelope.
pub fn decode<T: DeserializeOwned>(context: &str, body: &[u8]) -> ApplicationResult<T> {
    serde_json::from_slice(body).map_err(|source| ApplicationError::Decode {
        context: context.to_string(),
        source,
    })
}

/// Decode a response body that may carry a domain error envelope.
///
/// A non-empty string `error` field means the request was refused; the
/// payload is then not decoded at all.
pub fn decode_outcome<T: DeserializeOwned>(
    context: &str,
    body: &[u8],
) -> ApplicationResult<Outcome<T>> {
    let value: Value = decode(context, body)?;

    if let Some(rejection) = rejection(&value) {
        return Ok(Outcome::Rejected(rejection));
    }

    serde_json::from_value(value)
        .map(Outcome::Applied)
        .map_err(|source| ApplicationError::Decode {
            context: context.to_string(),
            source,
        })
}

fn rejection(value: &Value) -> Option<Rejection> {
    let code = value
        .get(ERROR_CODE_FIELD)
        .and_then(Value::as_str)
        .filter(|code| !code.is_empty())?;

    let description = ERROR_DESCRIPTION_FIELDS
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_str))
        .unwrap_or(code);

    Some(Rejection {
        code: code.to_string(),
        description: description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cancellation, CheckIn};

    #[test]
    fn given_empty_error_code_when_decoding_outcome_then_applied() {
        let body = br#"{"checkedIn": true, "error": "", "errorDescription": ""}"#;
        let outcome: Outcome<CheckIn> = decode_outcome("check-in", body).unwrap();
        assert_eq!(outcome, Outcome::Applied(CheckIn { checked_in: true }));
    }

    #[test]
    fn given_error_code_when_decoding_outcome_then_rejected_with_description() {
        let body = br#"{"error": "ALREADY_CANCELLED", "errorDescription": "Reservation already cancelled"}"#;
        let outcome: Outcome<Cancellation> = decode_outcome("cancel", body).unwrap();
        assert_eq!(
            outcome,
            Outcome::Rejected(Rejection {
                code: "ALREADY_CANCELLED".into(),
                description: "Reservation already cancelled".into(),
            })
        );
    }

    #[test]
    fn given_snake_case_description_when_decoding_outcome_then_used() {
        let body = br#"{"error": "denied", "error_description": "Not allowed"}"#;
        let outcome: Outcome<CheckIn> = decode_outcome("check-in", body).unwrap();
        match outcome {
            Outcome::Rejected(r) => assert_eq!(r.description, "Not allowed"),
            Outcome::Applied(_) => panic!("expected rejection"),
        }
    }

    #[test]
    fn given_error_without_description_when_decoding_outcome_then_code_is_description() {
        let body = br#"{"error": "denied"}"#;
        let outcome: Outcome<CheckIn> = decode_outcome("check-in", body).unwrap();
        assert!(matches!(outcome, Outcome::Rejected(r) if r.description == "denied"));
    }

    #[test]
    fn given_invalid_json_when_decoding_then_decode_error_names_context() {
        let err = decode::<Vec<u64>>("rooms", b"<html>").unwrap_err();
        assert!(err.to_string().contains("rooms"));
    }
}
