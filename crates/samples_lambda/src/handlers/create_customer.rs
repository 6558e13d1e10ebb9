use samples_core::contract::{
    error_response, json_response, validation_error_response, ApiGatewayRequest,
    ApiGatewayResponse,
};
use samples_core::customer::{
    CreateCustomerCommand, CustomerCreatedEvent, CUSTOMER_CREATED_DETAIL_TYPE,
    CUSTOMER_EVENT_SOURCE,
};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::adapters::event_publisher::EventPublisher;
use crate::config::CreateCustomerConfig;

pub const DEFAULT_TRACE_IDENTIFIER: &str = "untraced";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub publish_date: String,
    pub trace_identifier: String,
}

/// Detail body put on the event bus: the versioned payload plus metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub metadata: EventMetadata,
    pub payload: CustomerCreatedEvent,
}

impl EventEnvelope {
    pub fn wrap(payload: CustomerCreatedEvent, publish_date: String, trace_id: Option<&str>) -> Self {
        Self {
            kind: CUSTOMER_CREATED_DETAIL_TYPE,
            metadata: EventMetadata {
                kind: "Metadata",
                publish_date,
                trace_identifier: trace_id.unwrap_or(DEFAULT_TRACE_IDENTIFIER).to_string(),
            },
            payload,
        }
    }
}

/// Per-invocation values supplied by the runtime.
#[derive(Debug, Clone, Copy)]
pub struct InvocationContext<'a> {
    pub publish_date: &'a str,
    pub trace_id: Option<&'a str>,
}

pub fn handle_create_customer_event(
    event: Value,
    publisher: &dyn EventPublisher,
    config: &CreateCustomerConfig,
    invocation: InvocationContext<'_>,
) -> ApiGatewayResponse {
    let request = match ApiGatewayRequest::from_value(event) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&error),
    };
    let command = match request.parse_json_body::<CreateCustomerCommand>() {
        Ok(value) => value,
        Err(error) => return validation_error_response(&error),
    };

    if !command.is_valid() {
        tracing::warn!(component = "create_customer", event = "invalid_address");
        return error_response(
            400,
            json!({
                "error": "validation_error",
                "message": "address must include street, city, state and zip",
            }),
        );
    }

    let customer_id = Uuid::new_v4().to_string();
    let payload = CustomerCreatedEvent::from_command(config.event_version, &customer_id, command);
    let envelope = EventEnvelope::wrap(
        payload,
        invocation.publish_date.to_string(),
        invocation.trace_id,
    );
    let detail = match serde_json::to_string(&envelope) {
        Ok(detail) => detail,
        Err(error) => {
            return error_response(
                500,
                json!({"error": "serialization_error", "message": error.to_string()}),
            )
        }
    };

    match publisher.publish(CUSTOMER_EVENT_SOURCE, CUSTOMER_CREATED_DETAIL_TYPE, &detail) {
        Ok(()) => {
            tracing::info!(
                component = "create_customer",
                event = "customer_created_published",
                customer_id = %customer_id,
                version = ?config.event_version
            );
            json_response(201, json!({ "customerId": customer_id }))
        }
        Err(error) => {
            tracing::error!(component = "create_customer", event = "publish_failed", error = %error);
            error_response(
                500,
                json!({"error": "publish_failure", "message": error.to_string()}),
            )
        }
    }
}
