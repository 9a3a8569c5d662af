use crate::config::Mode;
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// The `Sns.Message` of an invocation record, as delivered.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// JSON text that still needs one decode step
    Text(String),
    Structured(Value),
}

impl From<Value> for MessageBody {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => MessageBody::Text(s),
            other => MessageBody::Structured(other),
        }
    }
}

impl MessageBody {
    /// Text form used for passthrough messages.
    pub fn raw_text(&self) -> String {
        match self {
            MessageBody::Text(s) => s.clone(),
            MessageBody::Structured(v) => v.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedEvent {
    /// CloudWatch alarm state change
    Alarm {
        name: String,
        description: String,
        namespace: String,
        account_id: String,
        region: String,
        metric_name: String,
        new_state: String,
        reason: String,
        timestamp: String,
    },
    /// RDS `db-instance` event notification
    StoreLifecycleEvent {
        source: String,
        event_time: String,
        source_id: String,
        identifier_link: String,
        source_arn: String,
        event_id: String,
        event_message: String,
    },
    /// EventBridge `ECS Service Action` event
    OrchestrationServiceAction {
        subtype: String,
        event_name: Option<String>,
        event_type: String,
        cluster_arn: String,
        created_at: String,
        resources: Vec<String>,
        reason: Option<String>,
    },
    Unclassified {
        raw_text: String,
    },
}

impl ClassifiedEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedEvent::Alarm { .. } => "alarm",
            ClassifiedEvent::StoreLifecycleEvent { .. } => "db-instance",
            ClassifiedEvent::OrchestrationServiceAction { .. } => "ecs-service-action",
            ClassifiedEvent::Unclassified { .. } => "unclassified",
        }
    }
}

/// Picks the shape of `body`. Checks run in a fixed order: alarm, RDS event,
/// ECS service action, then passthrough.
///
/// String bodies are decoded as JSON first, except in [`Mode::Debug`] where
/// they are taken as-is (and so can only ever pass through).
pub fn classify(body: &MessageBody, mode: Mode) -> Result<ClassifiedEvent> {
    let decoded;
    let value = match body {
        MessageBody::Structured(v) => v,
        MessageBody::Text(s) if mode == Mode::Debug => {
            return Ok(ClassifiedEvent::Unclassified { raw_text: s.clone() });
        }
        MessageBody::Text(s) => {
            decoded = serde_json::from_str::<Value>(s)?;
            &decoded
        }
    };

    let Some(fields) = value.as_object() else {
        return Ok(ClassifiedEvent::Unclassified { raw_text: body.raw_text() });
    };

    if is_alarm(fields) {
        return alarm(value);
    }
    if is_db_instance_event(fields) {
        return db_instance_event(value);
    }
    if is_ecs_service_action(fields) {
        return ecs_service_action(value);
    }

    Ok(ClassifiedEvent::Unclassified { raw_text: body.raw_text() })
}

// -------------------------------------------------------
// Predicates
// -------------------------------------------------------
fn is_alarm(fields: &Map<String, Value>) -> bool {
    fields.contains_key("AlarmArn") && fields.contains_key("AlarmName")
}

fn is_db_instance_event(fields: &Map<String, Value>) -> bool {
    fields
        .get("Event Source")
        .and_then(Value::as_str)
        .is_some_and(|s| s.to_lowercase() == "db-instance")
}

fn is_ecs_service_action(fields: &Map<String, Value>) -> bool {
    fields.get("detail-type").and_then(Value::as_str) == Some("ECS Service Action")
}

// -------------------------------------------------------
// Extraction
// -------------------------------------------------------
fn alarm(v: &Value) -> Result<ClassifiedEvent> {
    Ok(ClassifiedEvent::Alarm {
        name: text(v, "AlarmName")?,
        description: text(v, "AlarmDescription")?,
        namespace: text(v, "Trigger.Namespace")?,
        account_id: text(v, "AWSAccountId")?,
        region: text(v, "Region")?,
        metric_name: text(v, "Trigger.MetricName")?,
        new_state: text(v, "NewStateValue")?,
        reason: text(v, "NewStateReason")?,
        timestamp: text(v, "StateChangeTime")?,
    })
}

fn db_instance_event(v: &Value) -> Result<ClassifiedEvent> {
    Ok(ClassifiedEvent::StoreLifecycleEvent {
        source: text(v, "Event Source")?,
        event_time: text(v, "Event Time")?,
        source_id: text(v, "Source ID")?,
        identifier_link: text(v, "Identifier Link")?,
        source_arn: text(v, "Source ARN")?,
        event_id: text(v, "Event ID")?,
        event_message: text(v, "Event Message")?,
    })
}

fn ecs_service_action(v: &Value) -> Result<ClassifiedEvent> {
    Ok(ClassifiedEvent::OrchestrationServiceAction {
        subtype: text(v, "detail-type")?,
        event_name: lookup(v, "detail.eventName").map(scalar_text),
        event_type: text(v, "detail.eventType")?,
        cluster_arn: text(v, "detail.clusterArn")?,
        created_at: text(v, "detail.createdAt")?,
        resources: string_list(v, "resources")?,
        reason: lookup(v, "detail.reason").map(scalar_text),
    })
}

/// Walks a dotted path of object keys.
fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, key| node.get(key))
}

fn text(root: &Value, path: &str) -> Result<String> {
    lookup(root, path)
        .map(scalar_text)
        .ok_or_else(|| Error::MissingField { field: path.to_string() })
}

fn string_list(root: &Value, path: &str) -> Result<Vec<String>> {
    let items = lookup(root, path)
        .ok_or_else(|| Error::MissingField { field: path.to_string() })?
        .as_array()
        .ok_or_else(|| Error::UnexpectedType {
            field: path.to_string(),
            expected: "an array of strings",
        })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| Error::UnexpectedType {
                field: format!("{path}[{i}]"),
                expected: "a string",
            })
        })
        .collect()
}

/// Strings interpolate verbatim; anything else as compact JSON.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
