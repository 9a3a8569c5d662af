use crate::error::ConfigError;
use reqwest::Url;

pub const ENV_MODE: &str = "ENV";
pub const ENV_WEBHOOK: &str = "SLACK_WEBHOOK_URI";
pub const ENV_USERNAME: &str = "SLACK_DISPLAY_USERNAME";
pub const ENV_CHANNEL: &str = "SLACK_CHANNEL";

// -------------------------------------------------------
// Mode
// -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Message bodies are taken as already structured; string bodies are not decoded.
    /// A string body therefore always passes through unchanged, even one holding
    /// an alarm; it is never treated as structured and failed on field access.
    Debug,
    Normal,
}

impl Mode {
    fn from_env_value(value: &str) -> Self {
        if value == "DEBUG" {
            Mode::Debug
        } else {
            Mode::Normal
        }
    }
}

// -------------------------------------------------------
// Relay Config
// -------------------------------------------------------
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub mode: Mode,
    /// Pre-shared Slack incoming-webhook endpoint
    pub webhook_url: Url,
    /// Display name the message is posted under
    pub username: String,
    pub channel: String,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Every key is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let mode = Mode::from_env_value(&require(ENV_MODE)?);
        let raw_url = require(ENV_WEBHOOK)?;
        let webhook_url = Url::parse(raw_url.trim())
            .map_err(|e| ConfigError::InvalidWebhook(e.to_string()))?;

        Ok(Self {
            mode,
            webhook_url,
            username: require(ENV_USERNAME)?,
            channel: require(ENV_CHANNEL)?,
        })
    }
}

// -------------------------------------------------------
// INITIATE (TRACING SETUP)
// -------------------------------------------------------
pub fn initiate() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // RUST_LOG wins; otherwise the relay logs at info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sns_slack_relay=info"));

    // CloudWatch stamps each line itself and does not render ANSI
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::info!(target: "sns_slack_relay", "logging initiated");
}
