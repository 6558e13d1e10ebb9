use aws_sdk_dynamodb::error::DisplayErrorContext;
use samples_core::ticket::{Ticket, TICKET_KEY_ATTRIBUTE};

use super::dynamo::{optional_string, required_string, string_value};
use super::{block_on, AdapterError};

pub trait TicketStore {
    fn put_ticket(&self, ticket: &Ticket) -> Result<(), AdapterError>;
    fn get_ticket(&self, ticket_id: &str) -> Result<Option<Ticket>, AdapterError>;
}

#[derive(Debug, Clone)]
pub struct DynamoTicketStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoTicketStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

impl TicketStore for DynamoTicketStore {
    fn put_ticket(&self, ticket: &Ticket) -> Result<(), AdapterError> {
        let ticket_id = ticket.ticket_id.clone().ok_or_else(|| {
            AdapterError::Serialization("ticket must carry a ticketId before it is stored".into())
        })?;

        let request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item(TICKET_KEY_ATTRIBUTE, string_value(ticket_id))
            .item("userId", string_value(&ticket.user_id))
            .item("description", string_value(&ticket.description));

        block_on(request.send())
            .map(|_| ())
            .map_err(|error| {
                AdapterError::Service(format!(
                    "failed to put ticket into {}: {}",
                    self.table_name,
                    DisplayErrorContext(&error)
                ))
            })
    }

    fn get_ticket(&self, ticket_id: &str) -> Result<Option<Ticket>, AdapterError> {
        let request = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(TICKET_KEY_ATTRIBUTE, string_value(ticket_id));

        let output = block_on(request.send()).map_err(|error| {
            AdapterError::Service(format!(
                "failed to get ticket {ticket_id}: {}",
                DisplayErrorContext(&error)
            ))
        })?;

        let Some(item) = output.item() else {
            return Ok(None);
        };
        Ok(Some(Ticket {
            ticket_id: optional_string(item, TICKET_KEY_ATTRIBUTE),
            user_id: required_string(item, "userId")?,
            description: required_string(item, "description")?,
        }))
    }
}
