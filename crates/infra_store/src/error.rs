//! Store error types
//!
//! Errors raised while talking to the hosted table API, and their mapping
//! onto `PortError`:
//!
//! - 400/422 -> `PortError::Validation`
//! - 409 -> `PortError::Conflict`
//! - 401/403 -> `PortError::Unauthorized`
//! - 404 -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Connect failures -> `PortError::Connection`
//! - Undecodable bodies -> `PortError::Transformation`

use serde::Deserialize;
use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur while calling the table API
#[derive(Debug, Error)]
pub enum StoreError {
    /// The client could not be built from the configuration
    #[error("Invalid store configuration: {0}")]
    Configuration(String),

    /// The request never produced a response
    #[error("Request to {operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The store answered with a non-success status
    #[error("Store returned HTTP {status} for {operation}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        code: Option<String>,
        message: String,
        retry_after_secs: Option<u64>,
    },

    /// The response body was not the expected rows
    #[error("Could not decode {operation} response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

/// Error body returned by the table API
///
/// Carries the database error code (e.g. `23505` for a unique violation)
/// alongside a human-readable message.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl ApiErrorBody {
    /// Parses an error body, falling back to the raw text
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| ApiErrorBody {
            message: (!raw.trim().is_empty()).then(|| raw.trim().to_string()),
            ..Default::default()
        })
    }

    /// Message with details appended when present
    pub fn describe(&self) -> String {
        match (&self.message, &self.details) {
            (Some(message), Some(details)) => format!("{} ({})", message, details),
            (Some(message), None) => message.clone(),
            (None, Some(details)) => details.clone(),
            (None, None) => "no error body".to_string(),
        }
    }
}

impl StoreError {
    /// Builds a status error from a response status and body
    pub fn from_status(
        operation: &'static str,
        status: reqwest::StatusCode,
        retry_after_secs: Option<u64>,
        body: &str,
    ) -> Self {
        let body = ApiErrorBody::parse(body);
        StoreError::Status {
            operation,
            status: status.as_u16(),
            code: body.code.clone(),
            message: body.describe(),
            retry_after_secs,
        }
    }

    /// Returns the HTTP status if the store answered
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<StoreError> for PortError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Configuration(message) => PortError::internal(message),
            StoreError::Transport { operation, source } => {
                if source.is_timeout() {
                    PortError::Timeout {
                        operation: operation.to_string(),
                        duration_ms: 0,
                    }
                } else {
                    PortError::Connection {
                        message: format!("{} request failed", operation),
                        source: Some(Box::new(source)),
                    }
                }
            }
            StoreError::Status {
                operation,
                status,
                code,
                message,
                retry_after_secs,
            } => match status {
                400 | 422 => PortError::Validation {
                    message,
                    field: code,
                },
                409 => PortError::conflict(message),
                401 | 403 => PortError::Unauthorized { message },
                404 => PortError::not_found("Table resource", message),
                429 => PortError::RateLimited {
                    retry_after_secs: retry_after_secs.unwrap_or(0),
                },
                500..=599 => PortError::ServiceUnavailable {
                    service: format!("{} returned HTTP {}: {}", operation, status, message),
                },
                _ => PortError::internal(format!(
                    "{} returned unexpected HTTP {}: {}",
                    operation, status, message
                )),
            },
            StoreError::Decode { operation, message } => {
                PortError::transformation(format!("{}: {}", operation, message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let body = r#"{"code":"23505","details":"Key (claim_number)=(C-1) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"claims_claim_number_key\""}"#;
        let error = StoreError::from_status("insert", StatusCode::CONFLICT, None, body);

        assert_eq!(error.status(), Some(409));
        let port: PortError = error.into();
        assert!(matches!(port, PortError::Conflict { ref message } if message.contains("already exists")));
        assert!(port.is_rejection());
    }

    #[test]
    fn test_bad_column_maps_to_validation() {
        let body = r#"{"code":"PGRST204","details":null,"hint":null,"message":"Could not find the 'colour' column of 'claims' in the schema cache"}"#;
        let port: PortError = StoreError::from_status("insert", StatusCode::BAD_REQUEST, None, body).into();

        match port {
            PortError::Validation { message, field } => {
                assert!(message.contains("colour"));
                assert_eq!(field.as_deref(), Some("PGRST204"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_auth_failure_is_not_a_rejection() {
        let port: PortError =
            StoreError::from_status("select", StatusCode::UNAUTHORIZED, None, r#"{"message":"Invalid API key"}"#).into();
        assert!(matches!(port, PortError::Unauthorized { .. }));
        assert!(!port.is_rejection());
    }

    #[test]
    fn test_rate_limit_carries_retry_after() {
        let port: PortError = StoreError::from_status("select", StatusCode::TOO_MANY_REQUESTS, Some(12), "").into();
        assert!(matches!(port, PortError::RateLimited { retry_after_secs: 12 }));
    }

    #[test]
    fn test_server_error_is_transient() {
        let port: PortError = StoreError::from_status("delete", StatusCode::BAD_GATEWAY, None, "upstream down").into();
        assert!(port.is_transient());
        assert!(port.to_string().contains("upstream down"));
    }

    #[test]
    fn test_plain_text_body_is_kept() {
        let body = ApiErrorBody::parse("  gateway exploded ");
        assert_eq!(body.describe(), "gateway exploded");
        assert_eq!(ApiErrorBody::parse("").describe(), "no error body");
    }
}
