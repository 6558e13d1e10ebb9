use aws_sdk_eventbridge::error::DisplayErrorContext;
use aws_sdk_eventbridge::types::PutEventsRequestEntry;

use super::{block_on, AdapterError};

pub trait EventPublisher {
    fn publish(&self, source: &str, detail_type: &str, detail: &str) -> Result<(), AdapterError>;
}

#[derive(Debug, Clone)]
pub struct EventBridgePublisher {
    client: aws_sdk_eventbridge::Client,
    event_bus_name: String,
}

impl EventBridgePublisher {
    pub fn new(client: aws_sdk_eventbridge::Client, event_bus_name: impl Into<String>) -> Self {
        Self {
            client,
            event_bus_name: event_bus_name.into(),
        }
    }
}

impl EventPublisher for EventBridgePublisher {
    fn publish(&self, source: &str, detail_type: &str, detail: &str) -> Result<(), AdapterError> {
        let entry = PutEventsRequestEntry::builder()
            .event_bus_name(&self.event_bus_name)
            .source(source)
            .detail_type(detail_type)
            .detail(detail)
            .build();

        let output = block_on(self.client.put_events().entries(entry).send()).map_err(|error| {
            AdapterError::Service(format!(
                "failed to put {detail_type} event on {}: {}",
                self.event_bus_name,
                DisplayErrorContext(&error)
            ))
        })?;

        if let Some(failed) = output
            .entries()
            .iter()
            .find(|entry| entry.error_code().is_some())
        {
            return Err(AdapterError::Service(format!(
                "event bus rejected {detail_type} event: {} {}",
                failed.error_code().unwrap_or_default(),
                failed.error_message().unwrap_or_default()
            )));
        }
        Ok(())
    }
}
