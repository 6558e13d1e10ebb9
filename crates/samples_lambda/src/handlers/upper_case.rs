use aws_lambda_events::event::s3::S3Event;
use samples_core::transformation::{
    is_blank, matches_suffix, to_upper_case, TransformationOutcome,
};

use super::{object_locations, HandlerError};
use crate::adapters::object_store::ObjectStore;
use crate::config::UpperCaseConfig;

/// Copies every uploaded object to the destination bucket, upper-cased.
pub fn handle_upper_case_event(
    event: Option<&S3Event>,
    store: &dyn ObjectStore,
    config: &UpperCaseConfig,
) -> Result<TransformationOutcome, HandlerError> {
    let Some(event) = event else {
        tracing::warn!(component = "upper_case", event = "missing_event");
        return Ok(TransformationOutcome::missing_event());
    };

    let locations = object_locations(event);
    let mut skipped = event.records.len() - locations.len();
    let mut processed = 0;

    for (bucket, key) in locations {
        if !matches_suffix(&key, &config.source_key_suffix) {
            tracing::info!(component = "upper_case", event = "key_filtered", key = %key);
            skipped += 1;
            continue;
        }

        let content = store.get_object(&bucket, &key)?;
        if is_blank(&content) {
            tracing::info!(component = "upper_case", event = "blank_object_skipped", key = %key);
            skipped += 1;
            continue;
        }

        store.put_object(
            &config.destination_bucket,
            &key,
            &to_upper_case(&content),
        )?;
        tracing::info!(
            component = "upper_case",
            event = "object_written",
            source_bucket = %bucket,
            destination_bucket = %config.destination_bucket,
            key = %key
        );
        processed += 1;
    }

    Ok(TransformationOutcome::completed(processed, skipped))
}
