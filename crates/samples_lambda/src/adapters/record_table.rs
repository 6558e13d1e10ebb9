use aws_sdk_dynamodb::error::DisplayErrorContext;
use samples_core::transformation::TransformationRecord;

use super::dynamo::{required_string, string_value, Item};
use super::{block_on, AdapterError};

pub trait RecordTable {
    fn put_record(&self, record: &TransformationRecord) -> Result<(), AdapterError>;
    fn get_record(&self, id: &str) -> Result<Option<TransformationRecord>, AdapterError>;
}

#[derive(Debug, Clone)]
pub struct DynamoRecordTable {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoRecordTable {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

impl RecordTable for DynamoRecordTable {
    fn put_record(&self, record: &TransformationRecord) -> Result<(), AdapterError> {
        let request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item("id", string_value(&record.id))
            .item("content", string_value(&record.content))
            .item("time_to_live", string_value(&record.time_to_live));

        block_on(request.send()).map(|_| ()).map_err(|error| {
            AdapterError::Service(format!(
                "failed to put record {} into {}: {}",
                record.id,
                self.table_name,
                DisplayErrorContext(&error)
            ))
        })
    }

    fn get_record(&self, id: &str) -> Result<Option<TransformationRecord>, AdapterError> {
        let request = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", string_value(id));

        let output = block_on(request.send()).map_err(|error| {
            AdapterError::Service(format!(
                "failed to get record {id}: {}",
                DisplayErrorContext(&error)
            ))
        })?;

        output.item().map(record_from_item).transpose()
    }
}

fn record_from_item(item: &Item) -> Result<TransformationRecord, AdapterError> {
    Ok(TransformationRecord {
        id: required_string(item, "id")?,
        content: required_string(item, "content")?,
        time_to_live: required_string(item, "time_to_live")?,
    })
}
