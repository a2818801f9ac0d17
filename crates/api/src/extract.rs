//! Request extractors that translate axum rejections into the error
//! taxonomy.
//!
//! Handlers take [`ApiJson`] and [`ApiPath`] instead of the axum
//! originals so that an unparseable body becomes an
//! incomprehensible-message occurrence and a non-convertible path
//! parameter becomes an invalid-parameter occurrence, both in the
//! uniform envelope.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::path::ErrorKind;
use axum::extract::{FromRequest, FromRequestParts, Path};

use crate::error::{ApiError, MALFORMED_BODY_DETAIL};

/// JSON body extractor whose rejection is an [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor whose rejection is an [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Data errors cover wrong value types and unknown properties;
            // the deserializer exposes the offending field path.
            JsonRejection::JsonDataError(err) => {
                Self::Incomprehensible(data_error_detail(&err.body_text()))
            }
            JsonRejection::JsonSyntaxError(_) => {
                Self::Incomprehensible(MALFORMED_BODY_DETAIL.to_owned())
            }
            other => Self::Incomprehensible(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(inner) => {
                Self::InvalidParam(param_detail(inner.into_kind()))
            }
            other => Self::InvalidParam(other.body_text()),
        }
    }
}

/// Phrase a path-parameter conversion failure for the envelope.
fn param_detail(kind: ErrorKind) -> String {
    match kind {
        ErrorKind::ParseErrorAtKey {
            key,
            value,
            expected_type,
        } => format!(
            "The value '{value}' received as URL parameter '{key}' is of an invalid type. \
             Correct to a value of type '{expected_type}'."
        ),
        ErrorKind::ParseError {
            value,
            expected_type,
        }
        | ErrorKind::ParseErrorAtIndex {
            value,
            expected_type,
            ..
        } => format!(
            "The value '{value}' received as URL parameter is of an invalid type. \
             Correct to a value of type '{expected_type}'."
        ),
        kind => kind.to_string(),
    }
}

/// Pull the dotted field path out of an axum JSON data-error message.
///
/// axum reports these as
/// `Failed to deserialize the JSON body into the target type: <path>: <reason>`.
/// When that shape holds, rephrase around the offending property path;
/// otherwise fall back to the generic malformed-body detail.
fn data_error_detail(body_text: &str) -> String {
    let Some(rest) =
        body_text.strip_prefix("Failed to deserialize the JSON body into the target type: ")
    else {
        return MALFORMED_BODY_DETAIL.to_owned();
    };

    match rest.split_once(": ") {
        Some((path, reason)) if !path.contains(' ') && reason.contains("unknown field") => {
            format!("The property '{path}' does not exist. Please check and try again.")
        }
        Some((path, reason)) if !path.contains(' ') => {
            format!("The value for property '{path}' is invalid: {reason}")
        }
        _ => MALFORMED_BODY_DETAIL.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_detail() {
        let text = "Failed to deserialize the JSON body into the target type: \
                    address.zip: unknown field `zip`, expected one of `postalCode`, \
                    `street` at line 1 column 40";
        assert_eq!(
            data_error_detail(text),
            "The property 'address.zip' does not exist. Please check and try again."
        );
    }

    #[test]
    fn test_wrong_type_detail() {
        let text = "Failed to deserialize the JSON body into the target type: \
                    address.postalCode: invalid type: integer `42`, expected a string \
                    at line 1 column 37";
        assert_eq!(
            data_error_detail(text),
            "The value for property 'address.postalCode' is invalid: invalid type: \
             integer `42`, expected a string at line 1 column 37"
        );
    }

    #[test]
    fn test_pathless_error_falls_back() {
        assert_eq!(data_error_detail("something unexpected"), MALFORMED_BODY_DETAIL);
        assert_eq!(
            data_error_detail(
                "Failed to deserialize the JSON body into the target type: \
                 invalid type: sequence, expected struct CustomerPayload at line 1 column 0"
            ),
            MALFORMED_BODY_DETAIL
        );
    }
}
