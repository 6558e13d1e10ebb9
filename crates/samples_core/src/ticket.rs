use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TICKETS_TABLE: &str = "tickets";
pub const TICKET_KEY_ATTRIBUTE: &str = "ticketId";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    pub user_id: String,
    pub description: String,
}

impl Ticket {
    /// Returns the ticket keyed by `ticket_id`, replacing any client-supplied id.
    pub fn assign_id(self, ticket_id: impl Into<String>) -> Self {
        Self {
            ticket_id: Some(ticket_id.into()),
            ..self
        }
    }
}

pub fn generate_ticket_id() -> String {
    Uuid::new_v4().to_string()
}
