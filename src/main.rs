use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use reqwest::Client;
use serde_json::Value;
use sns_slack_relay::{initiate, Relay, RelayConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    initiate();

    let config = RelayConfig::from_env()?;
    tracing::info!(
        target: "sns_slack_relay",
        mode = ?config.mode,
        channel = %config.channel,
        "relay configured"
    );

    // one client for the lifetime of the execution environment
    let relay = Relay::new(config, Client::new());
    let relay = &relay;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        relay
            .handle(event.payload)
            .await
            .map(|_| ())
            .map_err(Error::from)
    }))
    .await
}
