//! Unified error handling: every failure becomes one `Occurrence` envelope.
//!
//! The taxonomy is deliberately small and closed: seven occurrence kinds,
//! each with a stable type URI, a display title, and exactly one HTTP
//! status. Clients are expected to branch on the `type` URI, never on the
//! prose fields. All route handlers return `Result<T, ApiError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::services::customers::CustomerServiceError;

/// Base for the stable occurrence type URIs.
const TYPE_URI_BASE: &str = "https://customer-registry.dev/occurrences";

/// Fixed user-facing message for failures whose real cause must stay
/// server-side.
pub const GENERIC_USER_MESSAGE: &str =
    "Internal error occurred. Check the problem and try again.";

/// Fixed detail for field-level validation failures.
pub const INVALID_DATA_DETAIL: &str =
    "There are one or more invalid properties. Please correct and try again.";

/// Fixed detail for unparseable request bodies.
pub const MALFORMED_BODY_DETAIL: &str =
    "The request body is invalid. Please check syntax error and try again.";

// =============================================================================
// Taxonomy
// =============================================================================

/// The closed set of occurrence kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceKind {
    ResourceNotFound,
    EntityInUse,
    BusinessRuleViolation,
    InvalidData,
    InvalidParam,
    IncomprehensibleMessage,
    SystemError,
}

impl OccurrenceKind {
    /// Display title, part of the public contract.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ResourceNotFound => "Resource not found",
            Self::EntityInUse => "Entity in use",
            Self::BusinessRuleViolation => "Business rules violation",
            Self::InvalidData => "Invalid data",
            Self::InvalidParam => "Invalid parameter",
            Self::IncomprehensibleMessage => "Incomprehensible message",
            Self::SystemError => "System error",
        }
    }

    /// URI path segment identifying the kind.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::ResourceNotFound => "/resource-not-found",
            Self::EntityInUse => "/entity-in-use",
            Self::BusinessRuleViolation => "/business-rules-violation",
            Self::InvalidData => "/invalid-data",
            Self::InvalidParam => "/invalid-param",
            Self::IncomprehensibleMessage => "/incomprehensible-msg",
            Self::SystemError => "/system-error",
        }
    }

    /// The stable type URI clients branch on.
    #[must_use]
    pub fn type_uri(self) -> String {
        format!("{TYPE_URI_BASE}{}", self.path())
    }

    /// The single HTTP status this kind maps to.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::EntityInUse => StatusCode::CONFLICT,
            Self::BusinessRuleViolation
            | Self::InvalidData
            | Self::InvalidParam
            | Self::IncomprehensibleMessage => StatusCode::BAD_REQUEST,
            Self::SystemError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// One field-level note inside an [`Occurrence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    /// Dotted path of the offending field (e.g. `address.postalCode`).
    pub name: String,
    /// Human-readable explanation for that field.
    pub user_message: String,
}

impl Description {
    /// Create a field description.
    pub fn new(name: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_message: user_message.into(),
        }
    }
}

/// The canonical error-response envelope.
///
/// Serialized camelCase with absent fields omitted, so every error
/// response parses the same way regardless of kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub title: &'static str,
    #[serde(rename = "type")]
    pub type_uri: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<Vec<Description>>,
    pub timestamp: DateTime<Utc>,
}

impl Occurrence {
    /// Create an envelope without field descriptions.
    #[must_use]
    pub fn new(
        kind: OccurrenceKind,
        detail: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            title: kind.title(),
            type_uri: kind.type_uri(),
            status: kind.status().as_u16(),
            detail: Some(detail.into()),
            user_message: Some(user_message.into()),
            descriptions: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a validation envelope with one entry per invalid field.
    #[must_use]
    pub fn with_descriptions(
        kind: OccurrenceKind,
        detail: impl Into<String>,
        user_message: impl Into<String>,
        descriptions: Vec<Description>,
    ) -> Self {
        Self {
            descriptions: Some(descriptions),
            ..Self::new(kind, detail, user_message)
        }
    }
}

// =============================================================================
// ApiError
// =============================================================================

/// Application-level error type for the registry API.
///
/// Each variant corresponds to exactly one [`OccurrenceKind`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity lookup miss, or an unmatched route.
    #[error("{0}")]
    NotFound(String),

    /// Delete blocked by a referential constraint.
    #[error("{0}")]
    EntityInUse(String),

    /// Domain-rule violation surfaced from the service layer.
    #[error("{0}")]
    BusinessRule(String),

    /// Payload failed field-level validation.
    #[error("payload has {} invalid field(s)", .0.len())]
    InvalidData(Vec<Description>),

    /// A path or query parameter could not be converted to its type.
    #[error("{0}")]
    InvalidParam(String),

    /// The request body could not be parsed.
    #[error("{0}")]
    Incomprehensible(String),

    /// Any uncaught failure. The payload is logged, never echoed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The occurrence kind this error maps to.
    #[must_use]
    pub const fn kind(&self) -> OccurrenceKind {
        match self {
            Self::NotFound(_) => OccurrenceKind::ResourceNotFound,
            Self::EntityInUse(_) => OccurrenceKind::EntityInUse,
            Self::BusinessRule(_) => OccurrenceKind::BusinessRuleViolation,
            Self::InvalidData(_) => OccurrenceKind::InvalidData,
            Self::InvalidParam(_) => OccurrenceKind::InvalidParam,
            Self::Incomprehensible(_) => OccurrenceKind::IncomprehensibleMessage,
            Self::Internal(_) => OccurrenceKind::SystemError,
        }
    }

    /// Build the response envelope for this error.
    ///
    /// Domain failures echo their message as both detail and user
    /// message; transport-shaped failures keep the generic user message;
    /// system errors expose nothing beyond the generic message.
    fn to_occurrence(&self) -> Occurrence {
        let kind = self.kind();
        match self {
            Self::NotFound(detail) | Self::EntityInUse(detail) | Self::BusinessRule(detail) => {
                Occurrence::new(kind, detail.clone(), detail.clone())
            }
            Self::InvalidParam(detail) | Self::Incomprehensible(detail) => {
                Occurrence::new(kind, detail.clone(), GENERIC_USER_MESSAGE)
            }
            Self::InvalidData(descriptions) => Occurrence::with_descriptions(
                kind,
                INVALID_DATA_DETAIL,
                INVALID_DATA_DETAIL,
                descriptions.clone(),
            ),
            Self::Internal(_) => {
                Occurrence::new(kind, GENERIC_USER_MESSAGE, GENERIC_USER_MESSAGE)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Capture server errors; everything else is the caller's fault
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.kind().status();
        (status, Json(self.to_occurrence())).into_response()
    }
}

impl From<CustomerServiceError> for ApiError {
    fn from(err: CustomerServiceError) -> Self {
        let message = err.to_string();
        match err {
            CustomerServiceError::NotFound(_) => Self::NotFound(message),
            CustomerServiceError::InUse(_) => Self::EntityInUse(message),
            CustomerServiceError::UnknownPostalCode(_) => Self::BusinessRule(message),
            CustomerServiceError::LookupUnavailable(_) | CustomerServiceError::Repository(_) => {
                Self::Internal(message)
            }
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
