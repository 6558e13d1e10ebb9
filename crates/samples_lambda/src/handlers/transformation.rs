use aws_lambda_events::event::s3::S3Event;
use samples_core::transformation::{
    is_blank, matches_suffix, TransformationOutcome, TransformationRecord,
};

use super::{object_locations, HandlerError};
use crate::adapters::object_store::ObjectStore;
use crate::adapters::record_table::RecordTable;
use crate::config::TransformationConfig;

/// Records each uploaded object's content in the transformation table with a
/// five minute TTL.
pub fn handle_transformation_event(
    event: Option<&S3Event>,
    objects: &dyn ObjectStore,
    records: &dyn RecordTable,
    config: &TransformationConfig,
    now_epoch_seconds: i64,
) -> Result<TransformationOutcome, HandlerError> {
    let Some(event) = event else {
        tracing::warn!(component = "transformation", event = "missing_event");
        return Ok(TransformationOutcome::missing_event());
    };

    let locations = object_locations(event);
    let mut skipped = event.records.len() - locations.len();
    let mut processed = 0;

    for (bucket, key) in locations {
        if !matches_suffix(&key, &config.source_key_suffix) {
            skipped += 1;
            continue;
        }

        let content = objects.get_object(&bucket, &key)?;
        if is_blank(&content) {
            tracing::info!(component = "transformation", event = "blank_object_skipped", key = %key);
            skipped += 1;
            continue;
        }

        let record = TransformationRecord::new(key, content, now_epoch_seconds);
        records.put_record(&record)?;
        tracing::info!(
            component = "transformation",
            event = "record_written",
            table = %config.table_name,
            id = %record.id,
            time_to_live = %record.time_to_live
        );
        processed += 1;
    }

    Ok(TransformationOutcome::completed(processed, skipped))
}
