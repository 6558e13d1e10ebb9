use aws_sdk_dynamodb::error::DisplayErrorContext;
use samples_core::order::{ORDER_KEY_ATTRIBUTE, ORDER_STATUS_ATTRIBUTE};

use super::dynamo::{optional_string, string_value};
use super::{block_on, AdapterError};

pub trait OrderStatusStore {
    fn order_status(&self, order_id: &str) -> Result<Option<String>, AdapterError>;
}

#[derive(Debug, Clone)]
pub struct DynamoOrderStatusStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoOrderStatusStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

impl OrderStatusStore for DynamoOrderStatusStore {
    fn order_status(&self, order_id: &str) -> Result<Option<String>, AdapterError> {
        let request = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ORDER_KEY_ATTRIBUTE, string_value(order_id))
            .projection_expression(ORDER_STATUS_ATTRIBUTE);

        let output = block_on(request.send()).map_err(|error| {
            AdapterError::Service(format!(
                "failed to read status of order {order_id}: {}",
                DisplayErrorContext(&error)
            ))
        })?;

        Ok(output
            .item()
            .and_then(|item| optional_string(item, ORDER_STATUS_ATTRIBUTE)))
    }
}
