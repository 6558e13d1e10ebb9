//! Environment configuration, read once per cold start.
//!
//! Every config exposes `from_env` for the binaries and `from_lookup` so tests
//! can supply variables without touching the process environment.

use samples_core::customer::{EventVersion, DEFAULT_CUSTOMER_TABLE};
use samples_core::order::DEFAULT_ORDER_DETAILS_TABLE;
use samples_core::ticket::DEFAULT_TICKETS_TABLE;
use samples_core::transformation::DEFAULT_SOURCE_KEY_SUFFIX;

pub const TICKETS_TABLE: &str = "TICKETS_TABLE";
pub const DESTINATION_BUCKET_NAME: &str = "DESTINATION_BUCKET_NAME";
pub const RECORD_TRANSFORMATION_TABLE_NAME: &str = "RECORD_TRANSFORMATION_TABLE_NAME";
pub const SOURCE_KEY_SUFFIX: &str = "SOURCE_KEY_SUFFIX";
pub const STATE_MACHINE_ARN: &str = "STATE_MACHINE_ARN";
pub const ORDER_QUEUE_URL: &str = "ORDER_QUEUE_URL";
pub const ORDER_DETAILS_TABLE: &str = "ORDER_DETAILS_TABLE";
pub const CUSTOMER_TABLE: &str = "CUSTOMER_TABLE";
pub const CUSTOMER_QUEUE_NAME: &str = "CUSTOMER_QUEUE_NAME";
pub const CUSTOMER_QUEUE_MESSAGE: &str = "CUSTOMER_QUEUE_MESSAGE";
pub const EVENT_BUS_NAME: &str = "EVENT_BUS_NAME";
pub const CUSTOMER_EVENT_VERSION: &str = "CUSTOMER_EVENT_VERSION";

pub const DEFAULT_CUSTOMER_QUEUE_MESSAGE: &str = "customer created";
pub const DEFAULT_EVENT_BUS_NAME: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
    #[error("{name} has unsupported value '{value}'")]
    Invalid { name: &'static str, value: String },
}

fn from_process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn optional<F>(lookup: &F, name: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).ok_or(ConfigError::Missing(name))
}

fn or_default<F>(lookup: &F, name: &'static str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).unwrap_or_else(|| default.to_string())
}

/// An explicitly empty suffix disables key filtering, so it is not trimmed away.
fn source_key_suffix<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(SOURCE_KEY_SUFFIX).unwrap_or_else(|| DEFAULT_SOURCE_KEY_SUFFIX.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketConfig {
    pub table_name: String,
}

impl TicketConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(from_process_env)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        Ok(Self {
            table_name: or_default(&lookup, TICKETS_TABLE, DEFAULT_TICKETS_TABLE),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpperCaseConfig {
    pub destination_bucket: String,
    pub source_key_suffix: String,
}

impl UpperCaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(from_process_env)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        Ok(Self {
            destination_bucket: required(&lookup, DESTINATION_BUCKET_NAME)?,
            source_key_suffix: source_key_suffix(&lookup),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationConfig {
    pub table_name: String,
    pub source_key_suffix: String,
}

impl TransformationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(from_process_env)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        Ok(Self {
            table_name: required(&lookup, RECORD_TRANSFORMATION_TABLE_NAME)?,
            source_key_suffix: source_key_suffix(&lookup),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub state_machine_arn: String,
}

impl WorkflowConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(from_process_env)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        Ok(Self {
            state_machine_arn: required(&lookup, STATE_MACHINE_ARN)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersConfig {
    pub queue_url: String,
    pub order_details_table: String,
}

impl OrdersConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(from_process_env)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        Ok(Self {
            queue_url: required(&lookup, ORDER_QUEUE_URL)?,
            order_details_table: or_default(
                &lookup,
                ORDER_DETAILS_TABLE,
                DEFAULT_ORDER_DETAILS_TABLE,
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomersConfig {
    pub table_name: String,
    /// Queue that receives a delayed notification per created customer.
    pub notification_queue: Option<String>,
    pub notification_message: String,
}

impl CustomersConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(from_process_env)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        Ok(Self {
            table_name: or_default(&lookup, CUSTOMER_TABLE, DEFAULT_CUSTOMER_TABLE),
            notification_queue: optional(&lookup, CUSTOMER_QUEUE_NAME),
            notification_message: or_default(
                &lookup,
                CUSTOMER_QUEUE_MESSAGE,
                DEFAULT_CUSTOMER_QUEUE_MESSAGE,
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomerConfig {
    pub event_bus_name: String,
    pub event_version: EventVersion,
}

impl CreateCustomerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(from_process_env)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        let event_version = match optional(&lookup, CUSTOMER_EVENT_VERSION) {
            None => EventVersion::default(),
            Some(value) => EventVersion::parse(&value).ok_or(ConfigError::Invalid {
                name: CUSTOMER_EVENT_VERSION,
                value,
            })?,
        };

        Ok(Self {
            event_bus_name: or_default(&lookup, EVENT_BUS_NAME, DEFAULT_EVENT_BUS_NAME),
            event_version,
        })
    }
}
