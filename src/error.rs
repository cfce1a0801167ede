//! Error types and handling for the `nalssi` gateway

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum NalssiError {
    /// A required query parameter was absent
    #[error("{message}")]
    MissingParameter { message: String },

    /// `locationKey` is not of the form `<lat>_<lon>`
    #[error("Invalid location key format")]
    InvalidLocationKeyFormat,

    /// Unrecognized `type` query value
    #[error("{message}")]
    UnsupportedType { message: String },

    /// Upstream call failed; carries the upstream status when one was received
    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl NalssiError {
    /// Create a new missing-parameter error
    pub fn missing_parameter<S: Into<String>>(message: S) -> Self {
        Self::MissingParameter {
            message: message.into(),
        }
    }

    /// Create a new unsupported-type error
    pub fn unsupported_type<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedType {
            message: message.into(),
        }
    }

    /// Create an upstream error without a status (answered as 500)
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// Create an upstream error carrying the upstream HTTP status
    pub fn upstream_status<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Upstream {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Prefix an upstream error message with what was being fetched.
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn context(self, label: &str) -> Self {
        match self {
            Self::Upstream { status, message } => Self::Upstream {
                status,
                message: format!("{label}: {message}"),
            },
            other => other,
        }
    }

    /// HTTP status this error is answered with
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter { .. }
            | Self::InvalidLocationKeyFormat
            | Self::UnsupportedType { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream {
                status: Some(code), ..
            } => StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Upstream { status: None, .. } | Self::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for NalssiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "Request failed: {}", self);
        } else {
            tracing::debug!(%status, "Request rejected: {}", self);
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let missing = NalssiError::missing_parameter("Location key is required");
        assert!(matches!(missing, NalssiError::MissingParameter { .. }));

        let upstream = NalssiError::upstream_status(404, "not found");
        assert!(matches!(
            upstream,
            NalssiError::Upstream {
                status: Some(404),
                ..
            }
        ));

        let config_err = NalssiError::config("edge.weather_url is not configured");
        assert!(config_err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            NalssiError::missing_parameter("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NalssiError::InvalidLocationKeyFormat.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NalssiError::unsupported_type("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NalssiError::upstream_status(429, "slow down").status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            NalssiError::upstream("connection reset").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_context_only_touches_upstream_errors() {
        let err = NalssiError::upstream_status(503, "503 - down").context("Alerts fetch failed");
        assert_eq!(err.to_string(), "Alerts fetch failed: 503 - down");
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = NalssiError::InvalidLocationKeyFormat.context("ignored");
        assert_eq!(err.to_string(), "Invalid location key format");
    }
}
