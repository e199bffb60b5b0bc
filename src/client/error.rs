use std::error::Error as StdError;
use std::fmt;

use crate::domain::{ModelError, ValidationError};
use crate::transport::ApiErrorDetail;

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`crate::TelnyxClient`] and its resource services.
///
/// This error preserves:
/// - local failures raised before any I/O (validation, model normalization),
/// - HTTP-level failures (transport failures, non-2xx status with the parsed error body),
/// - parse failures of successful response bodies.
pub enum TelnyxError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the API.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Response body could not be parsed as the declared model.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The request could not be turned into a URL (bad path template or base URL).
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] Box<dyn StdError + Send + Sync>),

    /// Client configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// One of the domain constructors or a request's `validate()` rejected a value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Parameters given as a raw map did not match the declared model.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl TelnyxError {
    /// HTTP status of an [`TelnyxError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Non-2xx response from the API.
pub struct ApiError {
    pub status: u16,
    pub kind: ApiErrorKind,
    pub errors: Vec<ApiErrorDetail>,
    pub request_id: Option<String>,
    pub body: Option<String>,
}

impl ApiError {
    pub(crate) fn from_response(status: u16, request_id: Option<String>, body: String) -> Self {
        let errors = crate::transport::decode_error_details(&body);
        let body = if body.trim().is_empty() {
            None
        } else {
            Some(body)
        };
        Self {
            status,
            kind: ApiErrorKind::from_status(status),
            errors,
            request_id,
            body,
        }
    }

    /// Telnyx error code of the first reported error, if any.
    pub fn code(&self) -> Option<&str> {
        self.errors.first().and_then(|err| err.code.as_deref())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error: HTTP {} ({:?})", self.status, self.kind)?;
        if let Some(first) = self.errors.first() {
            if let Some(code) = first.code.as_deref() {
                write!(f, " [{code}]")?;
            }
            if let Some(text) = first.detail.as_deref().or(first.title.as_deref()) {
                write!(f, ": {text}")?;
            }
        }
        Ok(())
    }
}

impl StdError for ApiError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Classification of API error statuses.
pub enum ApiErrorKind {
    BadRequest,
    Authentication,
    PermissionDenied,
    NotFound,
    Conflict,
    UnprocessableEntity,
    RateLimited,
    InternalServer,
    Other,
}

impl ApiErrorKind {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::UnprocessableEntity,
            429 => Self::RateLimited,
            500..=u16::MAX => Self::InternalServer,
            _ => Self::Other,
        }
    }

    /// Whether this status is likely transient and can be retried by the caller.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimited | Self::InternalServer)
    }

    /// Whether this status indicates invalid credentials or missing permissions.
    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::Authentication | Self::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classification_covers_common_statuses() {
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_status(422), ApiErrorKind::UnprocessableEntity);
        assert_eq!(ApiErrorKind::from_status(503), ApiErrorKind::InternalServer);
        assert_eq!(ApiErrorKind::from_status(418), ApiErrorKind::Other);

        assert!(ApiErrorKind::RateLimited.is_retryable());
        assert!(!ApiErrorKind::NotFound.is_retryable());
        assert!(ApiErrorKind::Authentication.is_auth_error());
        assert!(!ApiErrorKind::Conflict.is_auth_error());
    }

    #[test]
    fn api_error_keeps_status_and_parsed_body() {
        let body = r#"{"errors":[{"code":"10007","title":"Unexpected error","detail":"An unexpected error occured."}]}"#;
        let err = ApiError::from_response(500, Some("req_1".to_owned()), body.to_owned());
        assert_eq!(err.kind, ApiErrorKind::InternalServer);
        assert_eq!(err.code(), Some("10007"));
        assert_eq!(err.request_id.as_deref(), Some("req_1"));
        assert_eq!(
            err.to_string(),
            "API error: HTTP 500 (InternalServer) [10007]: An unexpected error occured."
        );
    }

    #[test]
    fn blank_error_body_maps_to_none() {
        let err = ApiError::from_response(503, None, "   ".to_owned());
        assert!(err.body.is_none());
        assert!(err.errors.is_empty());
        assert_eq!(err.to_string(), "API error: HTTP 503 (InternalServer)");
        assert_eq!(TelnyxError::from(err).status(), Some(503));
    }
}
