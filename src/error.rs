use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

/// Errors raised by the typed balldontlie client.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("invalid request parameters: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request URL could not be built from the configured base URL.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response arrived but could not be decoded into the expected shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),
}

impl ProviderError {
    /// Structural failures are the only ones that warrant the raw-HTTP fallback.
    pub fn is_structural(&self) -> bool {
        matches!(self, ProviderError::Schema(_))
    }
}

/// Every failure the team-performance lookup can surface, in precedence order.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    CallerInput(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Invalid API key")]
    Authentication,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid request parameters")]
    InvalidUpstreamParameters,

    #[error("Resource not found")]
    UpstreamResourceNotFound,

    #[error("External API server error")]
    UpstreamServer,

    #[error("External API request failed")]
    UpstreamRequestFailed { status: Option<u16> },

    #[error("Team not found for season")]
    TeamNotInCollection,

    #[error("Unexpected error: {0}")]
    Unclassified(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::CallerInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Configuration(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Authentication => StatusCode::BAD_GATEWAY,
            ServiceError::RateLimitExceeded => StatusCode::BAD_GATEWAY,
            ServiceError::InvalidUpstreamParameters => StatusCode::BAD_REQUEST,
            ServiceError::UpstreamResourceNotFound => StatusCode::NOT_FOUND,
            ServiceError::UpstreamServer => StatusCode::BAD_GATEWAY,
            ServiceError::UpstreamRequestFailed { .. } => StatusCode::BAD_GATEWAY,
            ServiceError::TeamNotInCollection => StatusCode::NOT_FOUND,
            ServiceError::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProviderError> for ServiceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Authentication(_) => ServiceError::Authentication,
            ProviderError::RateLimited(_) => ServiceError::RateLimitExceeded,
            ProviderError::Validation(_) => ServiceError::InvalidUpstreamParameters,
            ProviderError::NotFound(_) => ServiceError::UpstreamResourceNotFound,
            ProviderError::Server { .. } => ServiceError::UpstreamServer,
            ProviderError::Api { status, .. } => ServiceError::UpstreamRequestFailed {
                status: Some(status),
            },
            ProviderError::Transport(_) => ServiceError::UpstreamRequestFailed { status: None },
            ProviderError::Url(e) => ServiceError::Unclassified(e.to_string()),
            // Only reachable when a schema failure escapes without fallback.
            ProviderError::Schema(msg) => ServiceError::Unclassified(msg),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ServiceError::UpstreamRequestFailed { status: Some(code) } = &self {
            warn!("Upstream responded with status {}", code);
        }
        if status.is_server_error() {
            warn!("Request failed with {}: {:?}", status, self);
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_schema_errors_are_structural() {
        assert!(ProviderError::Schema("missing field `team`".into()).is_structural());
        assert!(!ProviderError::Authentication("bad key".into()).is_structural());
        assert!(!ProviderError::RateLimited("slow down".into()).is_structural());
        assert!(!ProviderError::Server {
            status: 503,
            message: "down".into()
        }
        .is_structural());
    }

    #[test]
    fn test_provider_error_mapping() {
        let cases: Vec<(ProviderError, StatusCode, &str)> = vec![
            (
                ProviderError::Authentication("x".into()),
                StatusCode::BAD_GATEWAY,
                "Invalid API key",
            ),
            (
                ProviderError::RateLimited("x".into()),
                StatusCode::BAD_GATEWAY,
                "Rate limit exceeded",
            ),
            (
                ProviderError::Validation("x".into()),
                StatusCode::BAD_REQUEST,
                "Invalid request parameters",
            ),
            (
                ProviderError::NotFound("x".into()),
                StatusCode::NOT_FOUND,
                "Resource not found",
            ),
            (
                ProviderError::Server {
                    status: 500,
                    message: "x".into(),
                },
                StatusCode::BAD_GATEWAY,
                "External API server error",
            ),
            (
                ProviderError::Api {
                    status: 418,
                    message: "x".into(),
                },
                StatusCode::BAD_GATEWAY,
                "External API request failed",
            ),
        ];

        for (provider_err, status, message) in cases {
            let err = ServiceError::from(provider_err);
            assert_eq!(err.status_code(), status);
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_url_build_failure_is_unclassified() {
        let err = ServiceError::from(ProviderError::Url(url::ParseError::RelativeUrlWithoutBase));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Unexpected error: "));
        assert!(!ProviderError::Url(url::ParseError::EmptyHost).is_structural());
    }

    #[test]
    fn test_local_errors_status() {
        assert_eq!(
            ServiceError::CallerInput("Season parameter is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Configuration("API key not configured".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ServiceError::TeamNotInCollection.status_code(),
            StatusCode::NOT_FOUND
        );
        let err = ServiceError::Unclassified("boom".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Unexpected error: boom");
    }
}
