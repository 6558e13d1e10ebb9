//! Synchronous request handlers.
//!
//! HTTP-facing handlers always answer with an [`ApiGatewayResponse`]; the S3
//! and SQS handlers return [`HandlerError`] so the platform records the
//! invocation as failed and retries it.
//!
//! [`ApiGatewayResponse`]: samples_core::contract::ApiGatewayResponse

pub mod create_customer;
pub mod customers;
pub mod list_buckets;
pub mod orders;
pub mod random_message;
pub mod ticket;
pub mod transformation;
pub mod upper_case;
pub mod workflow_starter;

use aws_lambda_events::event::s3::S3Event;
use serde_json::Value;

use crate::adapters::AdapterError;

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error("invalid event: {0}")]
    InvalidEvent(String),
    #[error("SQS batch carried no messages")]
    EmptyBatch,
    #[error(transparent)]
    Resolver(#[from] samples_core::resolvers::MappingError),
}

/// Decodes an S3 notification; `null` means the trigger delivered no event.
pub fn decode_s3_event(payload: Value) -> Result<Option<S3Event>, HandlerError> {
    if payload.is_null() {
        return Ok(None);
    }
    serde_json::from_value(payload)
        .map(Some)
        .map_err(|error| HandlerError::InvalidEvent(format!("malformed S3 event: {error}")))
}

/// Bucket/key pairs of the notification records that carry both, with keys
/// decoded from their form-urlencoded notification form.
pub(crate) fn object_locations(event: &S3Event) -> Vec<(String, String)> {
    event
        .records
        .iter()
        .filter_map(|record| {
            let bucket = record.s3.bucket.name.clone()?;
            let key = record.s3.object.key.as_deref()?;
            Some((bucket, decode_object_key(key)))
        })
        .collect()
}

/// `+` is a space; `%XX` escapes are UTF-8 bytes. Undecodable keys are kept as-is.
fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(error) => {
            tracing::warn!(event = "object_key_not_decoded", key = %raw, error = %error);
            raw.to_string()
        }
    }
}

#[cfg(test)]
pub(crate) fn s3_event_for(bucket: &str, keys: &[&str]) -> S3Event {
    use aws_lambda_events::event::s3::S3EventRecord;

    let mut event = S3Event::default();
    event.records = keys
        .iter()
        .map(|key| {
            let mut record = S3EventRecord::default();
            record.event_source = Some("aws:s3".to_string());
            record.s3.bucket.name = Some(bucket.to_string());
            record.s3.object.key = Some(key.to_string());
            record
        })
        .collect();
    event
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_payload_decodes_to_no_event() {
        assert!(decode_s3_event(Value::Null).expect("null is accepted").is_none());
        assert!(matches!(
            decode_s3_event(json!({"Records": "nope"})),
            Err(HandlerError::InvalidEvent(_))
        ));
    }

    #[test]
    fn records_without_bucket_or_key_are_dropped() {
        let mut event = s3_event_for("source", &["a.txt", "b.txt"]);
        event.records[1].s3.object.key = None;

        assert_eq!(
            object_locations(&event),
            vec![("source".to_string(), "a.txt".to_string())]
        );
    }

    #[test]
    fn notification_keys_are_form_url_decoded() {
        let event = s3_event_for("source", &["reports/q1+summary%281%29.txt", "caf%C3%A9.txt"]);

        assert_eq!(
            object_locations(&event),
            vec![
                ("source".to_string(), "reports/q1 summary(1).txt".to_string()),
                ("source".to_string(), "café.txt".to_string()),
            ]
        );
        assert_eq!(decode_object_key("a%2Bb.txt"), "a+b.txt");
        assert_eq!(decode_object_key("bad%FF.txt"), "bad%FF.txt");
    }
}
