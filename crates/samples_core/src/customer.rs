use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_CUSTOMER_TABLE: &str = "customer";
pub const CUSTOMER_KEY_ATTRIBUTE: &str = "customerId";
pub const CUSTOMER_DELETED_MESSAGE: &str = "customer deleted!!";
pub const CUSTOMER_CREATED_DETAIL_TYPE: &str = "CustomerCreated";
pub const CUSTOMER_EVENT_SOURCE: &str = "serverless-samples.customers";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: String,
    pub name: String,
    pub email: String,
}

/// Inbound customer payload; the id is optional and generated when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    #[serde(default)]
    pub customer_id: Option<String>,
    pub name: String,
    pub email: String,
}

impl CustomerView {
    pub fn into_customer(self) -> Customer {
        let customer_id = self
            .customer_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Customer {
            customer_id,
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
}

impl Address {
    pub fn is_complete(&self) -> bool {
        [&self.street, &self.city, &self.state, &self.zip]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerCommand {
    pub first_name: String,
    pub last_name: String,
    pub address: Option<Address>,
}

impl CreateCustomerCommand {
    pub fn is_valid(&self) -> bool {
        self.address
            .as_ref()
            .map(Address::is_complete)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventVersion {
    #[default]
    V1,
    V2,
    V3,
}

impl EventVersion {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Some(Self::V1),
            "v2" | "2" => Some(Self::V2),
            "v3" | "3" => Some(Self::V3),
            _ => None,
        }
    }
}

/// Published after a customer is created. Each variant is a wire version and
/// carries its own `type` discriminator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CustomerCreatedEvent {
    #[serde(rename = "CustomerCreatedEventV1", rename_all = "camelCase")]
    V1 {
        customer_id: String,
        first_name: String,
        last_name: String,
        address: Address,
    },
    #[serde(rename = "CustomerCreatedEventV2", rename_all = "camelCase")]
    V2 {
        customer_id: String,
        first_name: String,
        last_name: String,
        address: Address,
        email: String,
    },
    #[serde(rename = "CustomerCreatedEventV3", rename_all = "camelCase")]
    V3 {
        customer_id: String,
        address: Address,
    },
}

impl CustomerCreatedEvent {
    pub fn from_command(
        version: EventVersion,
        customer_id: impl Into<String>,
        command: CreateCustomerCommand,
    ) -> Self {
        let customer_id = customer_id.into();
        let address = command.address.unwrap_or_default();
        match version {
            EventVersion::V1 => Self::V1 {
                customer_id,
                first_name: command.first_name,
                last_name: command.last_name,
                address,
            },
            EventVersion::V2 => Self::V2 {
                customer_id,
                first_name: command.first_name,
                last_name: command.last_name,
                address,
                email: "test@test.com".to_string(),
            },
            EventVersion::V3 => Self::V3 {
                customer_id,
                address,
            },
        }
    }

    pub fn customer_id(&self) -> &str {
        match self {
            Self::V1 { customer_id, .. }
            | Self::V2 { customer_id, .. }
            | Self::V3 { customer_id, .. } => customer_id,
        }
    }
}
