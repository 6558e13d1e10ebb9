use samples_core::contract::{
    error_response, json_response, validation_error_response, ApiGatewayRequest,
    ApiGatewayResponse,
};
use samples_core::ticket::{generate_ticket_id, Ticket};
use serde_json::{json, Value};

use crate::adapters::ticket_store::TicketStore;
use crate::adapters::AdapterError;

pub fn handle_ticket_event(event: Value, store: &dyn TicketStore) -> ApiGatewayResponse {
    let request = match ApiGatewayRequest::from_value(event) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&error),
    };

    if request.method_is("GET") {
        return match request.path_parameter("ticketId") {
            Some(ticket_id) => read_ticket(ticket_id, store),
            None => error_response(
                400,
                json!({"error": "validation_error", "message": "ticketId path parameter is required"}),
            ),
        };
    }
    create_ticket(&request, store)
}

fn create_ticket(request: &ApiGatewayRequest, store: &dyn TicketStore) -> ApiGatewayResponse {
    let ticket = match request.parse_json_body::<Ticket>() {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(component = "ticket", event = "invalid_request", error = %error);
            return validation_error_response(&error);
        }
    };

    let ticket_id = generate_ticket_id();
    let ticket = ticket.assign_id(ticket_id.clone());
    tracing::info!(
        component = "ticket",
        event = "ticket_received",
        ticket_id = %ticket_id,
        user_id = %ticket.user_id
    );

    match store.put_ticket(&ticket) {
        Ok(()) => {
            tracing::info!(component = "ticket", event = "ticket_persisted", ticket_id = %ticket_id);
            json_response(200, &ticket_id)
        }
        Err(error) => {
            tracing::error!(component = "ticket", event = "persist_failed", error = %error);
            store_failure(&error)
        }
    }
}

fn read_ticket(ticket_id: &str, store: &dyn TicketStore) -> ApiGatewayResponse {
    match store.get_ticket(ticket_id) {
        Ok(Some(ticket)) => json_response(200, &ticket),
        Ok(None) => error_response(
            404,
            json!({"error": "not_found", "message": format!("ticket {ticket_id} not found")}),
        ),
        Err(error) => {
            tracing::error!(component = "ticket", event = "read_failed", ticket_id, error = %error);
            store_failure(&error)
        }
    }
}

fn store_failure(error: &AdapterError) -> ApiGatewayResponse {
    error_response(
        500,
        json!({"error": "store_failure", "message": error.to_string()}),
    )
}
