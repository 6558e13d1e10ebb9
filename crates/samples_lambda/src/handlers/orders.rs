use samples_core::contract::{
    error_response, json_response, text_response, validation_error_response, ApiGatewayRequest,
    ApiGatewayResponse,
};
use samples_core::order::{OrderRequest, OrderResponse, ORDER_NOT_FOUND_MESSAGE};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::adapters::message_queue::MessageQueue;
use crate::adapters::order_status::OrderStatusStore;
use crate::config::OrdersConfig;

const PLACE_ORDER_PATH: &str = "/orders/place";
const ORDER_STATUS_PREFIX: &str = "/orders/getStatus/";

pub fn handle_orders_event(
    event: Value,
    queue: &dyn MessageQueue,
    statuses: &dyn OrderStatusStore,
    config: &OrdersConfig,
) -> ApiGatewayResponse {
    let request = match ApiGatewayRequest::from_value(event) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&error),
    };

    let path = request.normalized_path();
    if request.method_is("POST") && path == PLACE_ORDER_PATH {
        return place_order(&request, queue, config);
    }
    if request.method_is("GET") {
        let order_id = request
            .path_parameter("uuid")
            .or_else(|| path.strip_prefix(ORDER_STATUS_PREFIX));
        if let Some(order_id) = order_id.filter(|id| !id.is_empty()) {
            return order_status(order_id, statuses);
        }
        if path.starts_with(ORDER_STATUS_PREFIX.trim_end_matches('/')) {
            return text_response(500, ORDER_NOT_FOUND_MESSAGE);
        }
    }

    error_response(
        404,
        json!({"error": "not_found", "message": format!("no route for {path}")}),
    )
}

fn place_order(
    request: &ApiGatewayRequest,
    queue: &dyn MessageQueue,
    config: &OrdersConfig,
) -> ApiGatewayResponse {
    let order_request = match request.parse_json_body::<OrderRequest>() {
        Ok(value) => value,
        Err(error) => return validation_error_response(&error),
    };

    let order = match order_request.validate() {
        Ok(order) => order,
        Err(field_errors) => {
            tracing::warn!(
                component = "orders",
                event = "validation_failed",
                fields = ?field_errors.keys().collect::<Vec<_>>()
            );
            return json_response(400, &field_errors);
        }
    };

    let order_id = Uuid::new_v4().to_string();
    let order = order.with_order_id(order_id.clone());
    let body = match serde_json::to_string(&order) {
        Ok(body) => body,
        Err(error) => {
            return error_response(
                500,
                json!({"error": "serialization_error", "message": error.to_string()}),
            )
        }
    };

    match queue.send_message(&config.queue_url, &body, None) {
        Ok(message_id) => {
            tracing::info!(
                component = "orders",
                event = "order_enqueued",
                order_id = %order_id,
                message_id = %message_id
            );
            json_response(200, OrderResponse::accepted(order_id))
        }
        Err(error) => {
            tracing::error!(component = "orders", event = "enqueue_failed", order_id = %order_id, error = %error);
            error_response(
                500,
                json!({"error": "queue_failure", "message": error.to_string()}),
            )
        }
    }
}

fn order_status(order_id: &str, statuses: &dyn OrderStatusStore) -> ApiGatewayResponse {
    match statuses.order_status(order_id) {
        Ok(Some(status)) => text_response(200, status),
        Ok(None) => {
            tracing::info!(component = "orders", event = "status_missing", order_id);
            text_response(500, ORDER_NOT_FOUND_MESSAGE)
        }
        Err(error) => {
            tracing::error!(component = "orders", event = "status_failed", order_id, error = %error);
            text_response(500, ORDER_NOT_FOUND_MESSAGE)
        }
    }
}
