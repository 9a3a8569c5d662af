use crate::config::RelayConfig;
use crate::core::{classify, render, MessageBody};
use crate::error::{Error, Result};
use crate::observability::{ChatMessage, DispatchResult, SlackDispatcher};

use reqwest::Client;
use serde_json::Value;

/// Classify, render and post one SNS notification.
pub struct Relay {
    config: RelayConfig,
    dispatcher: SlackDispatcher,
}

impl Relay {
    pub fn new(config: RelayConfig, client: Client) -> Self {
        let dispatcher = SlackDispatcher::new(client, config.webhook_url.clone());
        Self { config, dispatcher }
    }

    /// Handles one invocation. Every failure aborts the invocation; a webhook
    /// answering 4xx/5xx is still a completed dispatch.
    pub async fn handle(&self, event: Value) -> Result<DispatchResult> {
        let body = message_body(&event)?;
        let classified = classify(&body, self.config.mode)?;

        tracing::debug!(
            target: "sns_slack_relay",
            kind = classified.kind(),
            "classified notification"
        );

        let message = ChatMessage::new(
            self.config.channel.as_str(),
            self.config.username.as_str(),
            render(&classified),
        );

        let result = self.dispatcher.dispatch(&message).await?;

        tracing::info!(
            target: "sns_slack_relay",
            outbound = %serde_json::to_string(&message).unwrap_or_default(),
            event = %event,
            status_code = result.status,
            response = %result.body,
            "notification relayed"
        );

        Ok(result)
    }
}

/// `Records[0].Sns.Message` of an SNS invocation. Later records are ignored.
pub fn message_body(event: &Value) -> Result<MessageBody> {
    let record = event
        .get("Records")
        .ok_or(Error::Envelope { path: "Records" })?
        .get(0)
        .ok_or(Error::Envelope { path: "Records[0]" })?;

    let message = record
        .get("Sns")
        .ok_or(Error::Envelope { path: "Records[0].Sns" })?
        .get("Message")
        .ok_or(Error::Envelope { path: "Records[0].Sns.Message" })?;

    Ok(MessageBody::from(message.clone()))
}
