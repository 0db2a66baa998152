// Errors raised while talking to the analytics backend
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No authenticated session. Please sign in again.")]
    NoSession,

    #[error("Request failed with status {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_carries_status_and_body() {
        let err = ApiError::Http {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "backend down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status 503 Service Unavailable: backend down"
        );
    }
}
