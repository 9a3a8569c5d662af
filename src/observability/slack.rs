use crate::error::Result;
use reqwest::{header::CONTENT_TYPE, Client, Url};
use serde::Serialize;

pub const ICON_EMOJI: &str = ":rotating_light:";

/// Incoming-webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub channel: String,
    pub username: String,
    pub text: String,
    pub icon_emoji: &'static str,
}

impl ChatMessage {
    pub fn new(channel: impl Into<String>, username: impl Into<String>, text: String) -> Self {
        Self {
            channel: channel.into(),
            username: username.into(),
            text,
            icon_emoji: ICON_EMOJI,
        }
    }
}

/// Whatever the webhook answered. Non-2xx statuses are not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub status: u16,
    pub body: String,
}

pub struct SlackDispatcher {
    client: Client,
    endpoint: Url,
}

impl SlackDispatcher {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// One POST, no retries. Only transport failures are errors.
    pub async fn dispatch(&self, message: &ChatMessage) -> Result<DispatchResult> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .json(message)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            target: "sns_slack_relay::slack",
            status,
            "slack webhook answered"
        );

        Ok(DispatchResult { status, body })
    }
}
