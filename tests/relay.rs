use reqwest::{Client, Url};
use serde_json::{json, Value};
use sns_slack_relay::{ChatMessage, Error, Mode, Relay, RelayConfig, SlackDispatcher};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(webhook_url: Url, mode: Mode) -> RelayConfig {
    RelayConfig {
        mode,
        webhook_url,
        username: "AWS Alerts".to_string(),
        channel: "#ops".to_string(),
    }
}

fn relay_for(server: &MockServer, mode: Mode) -> Relay {
    let url = Url::parse(&format!("{}/hook", server.uri())).unwrap();
    Relay::new(config(url, mode), Client::new())
}

fn sns(message: Value) -> Value {
    json!({
        "Records": [ {
            "EventSource": "aws:sns",
            "Sns": { "Type": "Notification", "Message": message }
        } ]
    })
}

async fn accept_all(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(server)
        .await;
}

async fn posted_text(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().unwrap();
    body["text"].as_str().unwrap().to_string()
}

/// A local address nothing listens on.
fn dead_endpoint() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/hook")).unwrap()
}

#[tokio::test]
async fn alarm_is_posted_with_fixed_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(body_partial_json(json!({
            "channel": "#ops",
            "username": "AWS Alerts",
            "icon_emoji": ":rotating_light:"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let alarm = json!({
        "AlarmArn": "arn:x",
        "AlarmName": "HighCPU",
        "AlarmDescription": "d",
        "Trigger": { "Namespace": "AWS/EC2", "MetricName": "CPUUtilization" },
        "AWSAccountId": "123",
        "Region": "us-east-1",
        "NewStateValue": "ALARM",
        "NewStateReason": "r",
        "StateChangeTime": "t"
    });

    let result = relay_for(&server, Mode::Normal)
        .handle(sns(Value::String(alarm.to_string())))
        .await
        .unwrap();

    assert_eq!(result.status, 200);
    assert_eq!(result.body, "ok");
    assert!(posted_text(&server).await.starts_with("*Alarm:* HighCPU"));
}

#[tokio::test]
async fn rds_event_with_matching_ids_has_no_repeat() {
    let server = MockServer::start().await;
    accept_all(&server).await;

    let rds = json!({
        "Event Source": "db-instance",
        "Event Time": "t",
        "Source ID": "db1",
        "Identifier Link": "l",
        "Source ARN": "arn",
        "Event ID": "l",
        "Event Message": "m"
    });

    relay_for(&server, Mode::Normal)
        .handle(sns(Value::String(rds.to_string())))
        .await
        .unwrap();

    let text = posted_text(&server).await;
    assert!(text.contains("*Event ID:* l\n"));
    assert!(!text.contains(" - "));
}

#[tokio::test]
async fn ecs_action_joins_resources_without_reason() {
    let server = MockServer::start().await;
    accept_all(&server).await;

    let ecs = json!({
        "detail-type": "ECS Service Action",
        "detail": { "eventType": "x", "clusterArn": "c", "createdAt": "t" },
        "resources": ["r1", "r2"]
    });

    relay_for(&server, Mode::Normal)
        .handle(sns(Value::String(ecs.to_string())))
        .await
        .unwrap();

    let text = posted_text(&server).await;
    assert!(text.contains("Resources: r1, r2\n"));
    assert!(!text.contains("Reason:"));
}

#[tokio::test]
async fn unknown_message_is_passed_through() {
    let server = MockServer::start().await;
    accept_all(&server).await;

    let raw = r#"{"source":"aws.health","detail":{"service":"EC2"}}"#;
    relay_for(&server, Mode::Normal)
        .handle(sns(Value::String(raw.to_string())))
        .await
        .unwrap();

    assert_eq!(posted_text(&server).await, raw);
}

#[tokio::test]
async fn debug_mode_takes_structured_message_as_is() {
    let server = MockServer::start().await;
    accept_all(&server).await;

    let rds = json!({
        "Event Source": "db-instance",
        "Event Time": "t",
        "Source ID": "db1",
        "Identifier Link": "https://console/db1",
        "Source ARN": "arn",
        "Event ID": "RDS-EVENT-0006",
        "Event Message": "m"
    });

    relay_for(&server, Mode::Debug).handle(sns(rds)).await.unwrap();

    let text = posted_text(&server).await;
    assert!(text.contains("*Event ID:* RDS-EVENT-0006 - RDS-EVENT-0006\n"));
}

#[tokio::test]
async fn error_status_is_a_completed_dispatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("invalid_payload"))
        .expect(1)
        .mount(&server)
        .await;

    let result = relay_for(&server, Mode::Normal)
        .handle(sns(Value::String("{}".to_string())))
        .await
        .unwrap();

    assert_eq!(result.status, 500);
    assert_eq!(result.body, "invalid_payload");
}

#[tokio::test]
async fn malformed_body_fails_before_posting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = relay_for(&server, Mode::Normal)
        .handle(sns(Value::String("not json".to_string())))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn missing_field_fails_before_posting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let alarm = json!({ "AlarmArn": "arn:x", "AlarmName": "HighCPU" });
    let err = relay_for(&server, Mode::Debug)
        .handle(sns(alarm))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingField { field } if field == "AlarmDescription"));
}

#[tokio::test]
async fn unreachable_webhook_is_a_transport_error() {
    let url = dead_endpoint();

    let dispatcher = SlackDispatcher::new(Client::new(), url.clone());
    let msg = ChatMessage::new("#ops", "AWS Alerts", "hi".to_string());
    assert!(matches!(dispatcher.dispatch(&msg).await, Err(Error::Transport(_))));

    let relay = Relay::new(config(url, Mode::Normal), Client::new());
    let err = relay
        .handle(sns(Value::String("{}".to_string())))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
