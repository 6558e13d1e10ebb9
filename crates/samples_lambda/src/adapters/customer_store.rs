use aws_sdk_dynamodb::error::DisplayErrorContext;
use samples_core::customer::{Customer, CUSTOMER_KEY_ATTRIBUTE};

use super::dynamo::{required_string, string_value, Item};
use super::{block_on, AdapterError};

pub trait CustomerStore {
    fn get(&self, customer_id: &str) -> Result<Option<Customer>, AdapterError>;
    fn save(&self, customer: &Customer) -> Result<(), AdapterError>;
    fn delete(&self, customer_id: &str) -> Result<(), AdapterError>;
    fn scan_all(&self) -> Result<Vec<Customer>, AdapterError>;
}

#[derive(Debug, Clone)]
pub struct DynamoCustomerStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoCustomerStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn service_error(&self, action: &str, error: impl std::fmt::Display) -> AdapterError {
        AdapterError::Service(format!("failed to {action} in {}: {error}", self.table_name))
    }
}

fn customer_from_item(item: &Item) -> Result<Customer, AdapterError> {
    Ok(Customer {
        customer_id: required_string(item, CUSTOMER_KEY_ATTRIBUTE)?,
        name: required_string(item, "name")?,
        email: required_string(item, "email")?,
    })
}

impl CustomerStore for DynamoCustomerStore {
    fn get(&self, customer_id: &str) -> Result<Option<Customer>, AdapterError> {
        let request = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(CUSTOMER_KEY_ATTRIBUTE, string_value(customer_id));

        let output = block_on(request.send())
            .map_err(|error| self.service_error("get customer", DisplayErrorContext(&error)))?;
        output.item().map(customer_from_item).transpose()
    }

    fn save(&self, customer: &Customer) -> Result<(), AdapterError> {
        let request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item(CUSTOMER_KEY_ATTRIBUTE, string_value(&customer.customer_id))
            .item("name", string_value(&customer.name))
            .item("email", string_value(&customer.email));

        block_on(request.send())
            .map(|_| ())
            .map_err(|error| self.service_error("save customer", DisplayErrorContext(&error)))
    }

    fn delete(&self, customer_id: &str) -> Result<(), AdapterError> {
        let request = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(CUSTOMER_KEY_ATTRIBUTE, string_value(customer_id));

        block_on(request.send())
            .map(|_| ())
            .map_err(|error| self.service_error("delete customer", DisplayErrorContext(&error)))
    }

    fn scan_all(&self) -> Result<Vec<Customer>, AdapterError> {
        let mut customers = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take());
            let output = block_on(request.send())
                .map_err(|error| self.service_error("scan customers", DisplayErrorContext(&error)))?;

            for item in output.items() {
                customers.push(customer_from_item(item)?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        Ok(customers)
    }
}
