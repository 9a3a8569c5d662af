use crate::core::event::ClassifiedEvent;

/// Slack text for a classified event. `*x*` is Slack mrkdwn bold.
pub fn render(event: &ClassifiedEvent) -> String {
    match event {
        ClassifiedEvent::Alarm {
            name,
            description,
            namespace,
            account_id,
            region,
            metric_name,
            new_state,
            reason,
            timestamp,
        } => format!(
            "*Alarm:* {name}\n\
             *Description*\n\
             {description}\n\
             *Details*\n\
             Alarm raised by: *{namespace}*, in account: *{account_id}*, *{region}* region.\n\
             Metric failing the alarm: *{metric_name}*\n\
             State: {new_state} with Reason: {reason}\n\
             Timestamp: {timestamp}\n"
        ),

        ClassifiedEvent::StoreLifecycleEvent {
            source,
            event_time,
            source_id,
            identifier_link,
            source_arn,
            event_id,
            event_message,
        } => {
            // the event id is repeated when it is not just the console link
            let repeated_id = if event_id != identifier_link {
                format!(" - {event_id}")
            } else {
                String::new()
            };
            format!(
                "*Event Source:* {source}\n\
                 *Event Time:* {event_time}\n\
                 *Identifier Link:* [{source_id}]({identifier_link})\n\
                 *Source ID:* {source_id}\n\
                 *Source ARN:* {source_arn}\n\
                 *Event ID:* {event_id}{repeated_id}\n\
                 *Event Message:* {event_message}\n"
            )
        }

        ClassifiedEvent::OrchestrationServiceAction {
            subtype,
            event_name,
            event_type,
            cluster_arn,
            created_at,
            resources,
            reason,
        } => {
            let header = match event_name {
                Some(name) => format!("{subtype} - {name}"),
                None => subtype.clone(),
            };
            let mut text = format!(
                "*ECS Service Action:* {header}\n\
                 \n\
                 *Details*\n\
                 Event Type: *{event_type}*\n\
                 Cluster ARN: *{cluster_arn}*\n\
                 Created At: *{created_at}*\n\
                 Resources: {}\n",
                resources.join(", ")
            );
            if let Some(reason) = reason {
                text.push_str(&format!("Reason: *{reason}*"));
            }
            text
        }

        ClassifiedEvent::Unclassified { raw_text } => raw_text.clone(),
    }
}
