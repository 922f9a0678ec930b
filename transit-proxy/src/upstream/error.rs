//! Upstream client error types.

/// Errors from talking to either prediction API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API key rejected
    #[error("unauthorized: upstream rejected the API key")]
    Unauthorized,

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 200 but reported an error in its envelope
    #[error("{upstream} reported error {code}: {message}")]
    Reported {
        upstream: &'static str,
        code: String,
        message: String,
    },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Canned response data could not be loaded or was not found
    #[error("mock data error: {0}")]
    Mock(String),
}

impl UpstreamError {
    /// Build a [`UpstreamError::Json`] keeping a bounded prefix of the body.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        UpstreamError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = UpstreamError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized: upstream rejected the API key");

        let err = UpstreamError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = UpstreamError::Reported {
            upstream: "train tracker",
            code: "101".into(),
            message: "Invalid API key".into(),
        };
        assert_eq!(
            err.to_string(),
            "train tracker reported error 101: Invalid API key"
        );
    }

    #[test]
    fn json_error_truncates_body() {
        let body = "x".repeat(2000);
        let parse_err = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();
        let err = UpstreamError::json(parse_err, &body);

        match err {
            UpstreamError::Json { message, body } => {
                assert!(!message.is_empty());
                assert_eq!(body.map(|b| b.len()), Some(500));
            }
            other => panic!("expected Json error, got {other:?}"),
        }
    }
}
