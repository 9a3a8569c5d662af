use thiserror::Error;

/// Failures of a single invocation. None of these are recovered locally;
/// they surface to the Lambda runtime, which owns retry policy.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invocation payload has no `{path}`")]
    Envelope { path: &'static str },

    #[error("message body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("message body is missing field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` is not {expected}")]
    UnexpectedType { field: String, expected: &'static str },

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable `{0}` is not set")]
    Missing(&'static str),

    #[error("SLACK_WEBHOOK_URI is not a valid URL: {0}")]
    InvalidWebhook(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
