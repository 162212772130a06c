use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    /// Backend refused the request and explained why
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Error body shape used by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ApiError {
    pub fn from_status(status: StatusCode, message: String) -> Self {
        let msg = if message.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            message
        };

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(msg),
            StatusCode::FORBIDDEN => ApiError::Unauthorized(msg),
            StatusCode::NOT_FOUND => ApiError::NotFound(msg),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(msg),
            status if status.is_server_error() => ApiError::ServerError(msg),
            status if status.is_client_error() => ApiError::BadRequest(msg),
            _ => ApiError::Unknown(msg),
        }
    }

    /// Build an error from a failed response body, preferring its `detail`
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|detail| match detail {
                serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
                serde_json::Value::Null => None,
                serde_json::Value::String(_) => None,
                // validation errors arrive as structured lists
                other => Some(other.to_string()),
            });

        match detail {
            Some(detail) => ApiError::Rejected { status, detail },
            None => Self::from_status(status, body.trim().to_string()),
        }
    }

    /// Detail message supplied by the backend, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::NetworkError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_prefers_detail() {
        let err = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Ya existe una tarjeta para ese día"}"#,
        );
        assert_eq!(err.detail(), Some("Ya existe una tarjeta para ese día"));
        assert_eq!(err.to_string(), "Ya existe una tarjeta para ese día");
    }

    #[test]
    fn test_from_body_without_detail_maps_status() {
        let err = ApiError::from_body(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(matches!(err, ApiError::ServerError(_)));
        assert!(err.detail().is_none());

        let err = ApiError::from_body(StatusCode::NOT_FOUND, r#"{"detail": null}"#);
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
