/*
[INPUT]:  Error sources (HTTP, API status, serialization, configuration)
[OUTPUT]: Structured error type for weather lookups
[POS]:    Error handling layer - unified error type for the crate
[UPDATE]: When adding new error sources
*/

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response decoded but lacked required data
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No API key configured
    #[error("Weather API key is not configured")]
    MissingApiKey,

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl WeatherError {
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        WeatherError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Whether retrying later could help. Configuration problems cannot.
    pub fn is_transient(&self) -> bool {
        match self {
            WeatherError::Http(_) => true,
            WeatherError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = WeatherError::api_error(StatusCode::UNAUTHORIZED, "Invalid API key");
        match err {
            WeatherError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key");
            }
            _ => panic!("Expected Api error variant"),
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(WeatherError::api_error(StatusCode::SERVICE_UNAVAILABLE, "").is_transient());
        assert!(WeatherError::api_error(StatusCode::TOO_MANY_REQUESTS, "").is_transient());
        assert!(!WeatherError::api_error(StatusCode::UNAUTHORIZED, "").is_transient());
        assert!(!WeatherError::MissingApiKey.is_transient());
    }
}
