use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Unified error type for the Beacon notification hub
#[derive(Error, Debug)]
pub enum BeaconError {
    // Hub errors
    #[error("Malformed control message: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize {event_type} event: {source}")]
    Serialization {
        event_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Delivery to connection {connection_id} failed: {reason}")]
    Delivery {
        connection_id: String,
        reason: String,
    },

    #[error("Transport error on connection {connection_id}: {reason}")]
    Transport {
        connection_id: String,
        reason: String,
    },

    #[error("Dashboard snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    // Request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Beacon operations
pub type Result<T> = std::result::Result<T, BeaconError>;

impl BeaconError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            BeaconError::Parse(_)
            | BeaconError::InvalidRequest(_)
            | BeaconError::InvalidConfig(_) => StatusCode::BAD_REQUEST,

            // 502 Bad Gateway
            BeaconError::Delivery { .. } | BeaconError::Transport { .. } => {
                StatusCode::BAD_GATEWAY
            }

            // 503 Service Unavailable
            BeaconError::SnapshotUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            BeaconError::Serialization { .. }
            | BeaconError::Io(_)
            | BeaconError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

// Implement IntoResponse for API error responses
impl IntoResponse for BeaconError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
    }

    #[test]
    fn test_error_status_code_mapping() {
        assert_eq!(
            BeaconError::Parse(json_error()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BeaconError::InvalidRequest("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BeaconError::Serialization {
                event_type: "HEALTH_UPDATE",
                source: json_error(),
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BeaconError::Delivery {
                connection_id: "c1".to_string(),
                reason: "closed".to_string(),
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            BeaconError::SnapshotUnavailable("down".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_client_server_helpers() {
        assert!(BeaconError::InvalidRequest("bad".to_string()).is_client_error());
        assert!(!BeaconError::InvalidRequest("bad".to_string()).is_server_error());

        assert!(BeaconError::Internal("boom".to_string()).is_server_error());
        assert!(!BeaconError::Internal("boom".to_string()).is_client_error());
    }

    #[test]
    fn test_serialization_error_names_event_type() {
        let err = BeaconError::Serialization {
            event_type: "METRICS_UPDATE",
            source: json_error(),
        };
        assert!(err.to_string().contains("METRICS_UPDATE"));
    }
}
