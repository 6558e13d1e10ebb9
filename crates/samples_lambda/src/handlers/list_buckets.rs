use samples_core::contract::{
    text_response, validation_error_response, ApiGatewayRequest, ApiGatewayResponse,
};
use serde_json::Value;

use crate::adapters::bucket_lister::BucketLister;

pub const METHOD_NOT_SUPPORTED: &str = "Http Method Not Supported";
pub const BUCKET_SEPARATOR: &str = "|";
const EMPTY_BODY: &str = "{}";

pub fn handle_list_buckets_event(event: Value, lister: &dyn BucketLister) -> ApiGatewayResponse {
    let request = match ApiGatewayRequest::from_value(event) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&error),
    };

    if !request.method_is("GET") {
        tracing::warn!(
            component = "list_buckets",
            event = "method_rejected",
            method = request.http_method.as_deref().unwrap_or_default()
        );
        return text_response(405, METHOD_NOT_SUPPORTED);
    }

    match lister.list_bucket_names() {
        Ok(names) => {
            tracing::info!(component = "list_buckets", event = "listed", count = names.len());
            text_response(200, names.join(BUCKET_SEPARATOR))
        }
        Err(error) => {
            tracing::error!(component = "list_buckets", event = "list_failed", error = %error);
            text_response(500, EMPTY_BODY)
        }
    }
}
