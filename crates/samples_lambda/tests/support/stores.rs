#![allow(dead_code)]

//! In-memory adapters. Writes become readable only after a configurable
//! number of reads, which mimics the lag between an asynchronous write and a
//! consistent read of it.

use std::collections::BTreeMap;
use std::sync::Mutex;

use samples_core::customer::Customer;
use samples_core::ticket::Ticket;
use samples_core::transformation::TransformationRecord;
use samples_lambda::adapters::customer_store::CustomerStore;
use samples_lambda::adapters::message_queue::MessageQueue;
use samples_lambda::adapters::object_store::ObjectStore;
use samples_lambda::adapters::order_status::OrderStatusStore;
use samples_lambda::adapters::record_table::RecordTable;
use samples_lambda::adapters::ticket_store::TicketStore;
use samples_lambda::adapters::workflow::{StartedExecution, WorkflowStarter};
use samples_lambda::adapters::AdapterError;

struct Pending<V> {
    value: V,
    reads_until_visible: usize,
}

pub struct EventualMap<V> {
    entries: Mutex<BTreeMap<String, Pending<V>>>,
    lag: usize,
}

impl<V: Clone> EventualMap<V> {
    pub fn new(lag: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            lag,
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.entries.lock().expect("poisoned mutex").insert(
            key.into(),
            Pending {
                value,
                reads_until_visible: self.lag,
            },
        );
    }

    /// Counts as one read; returns the value once its lag has elapsed.
    pub fn read(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().expect("poisoned mutex");
        let entry = entries.get_mut(key)?;
        if entry.reads_until_visible > 0 {
            entry.reads_until_visible -= 1;
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn visible_values(&self) -> Vec<V> {
        let mut entries = self.entries.lock().expect("poisoned mutex");
        entries
            .values_mut()
            .filter_map(|entry| {
                if entry.reads_until_visible > 0 {
                    entry.reads_until_visible -= 1;
                    None
                } else {
                    Some(entry.value.clone())
                }
            })
            .collect()
    }

    pub fn remove(&self, key: &str) {
        self.entries.lock().expect("poisoned mutex").remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("poisoned mutex").len()
    }
}

pub struct EventualTicketStore(pub EventualMap<Ticket>);

impl EventualTicketStore {
    pub fn new(lag: usize) -> Self {
        Self(EventualMap::new(lag))
    }
}

impl TicketStore for EventualTicketStore {
    fn put_ticket(&self, ticket: &Ticket) -> Result<(), AdapterError> {
        let id = ticket
            .ticket_id
            .clone()
            .ok_or_else(|| AdapterError::Serialization("ticket without id".into()))?;
        self.0.insert(id, ticket.clone());
        Ok(())
    }

    fn get_ticket(&self, ticket_id: &str) -> Result<Option<Ticket>, AdapterError> {
        Ok(self.0.read(ticket_id))
    }
}

pub struct EventualRecordTable(pub EventualMap<TransformationRecord>);

impl EventualRecordTable {
    pub fn new(lag: usize) -> Self {
        Self(EventualMap::new(lag))
    }
}

impl RecordTable for EventualRecordTable {
    fn put_record(&self, record: &TransformationRecord) -> Result<(), AdapterError> {
        self.0.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn get_record(&self, id: &str) -> Result<Option<TransformationRecord>, AdapterError> {
        Ok(self.0.read(id))
    }
}

pub struct EventualCustomerStore(pub EventualMap<Customer>);

impl EventualCustomerStore {
    pub fn new(lag: usize) -> Self {
        Self(EventualMap::new(lag))
    }
}

impl CustomerStore for EventualCustomerStore {
    fn get(&self, customer_id: &str) -> Result<Option<Customer>, AdapterError> {
        Ok(self.0.read(customer_id))
    }

    fn save(&self, customer: &Customer) -> Result<(), AdapterError> {
        self.0.insert(customer.customer_id.clone(), customer.clone());
        Ok(())
    }

    fn delete(&self, customer_id: &str) -> Result<(), AdapterError> {
        self.0.remove(customer_id);
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<Customer>, AdapterError> {
        Ok(self.0.visible_values())
    }
}

/// Objects keyed by `bucket/key`, with the same read lag for every object.
pub struct EventualObjectStore(pub EventualMap<String>);

impl EventualObjectStore {
    pub fn new(lag: usize) -> Self {
        Self(EventualMap::new(lag))
    }

    pub fn seed(&self, bucket: &str, key: &str, body: &str) {
        self.0.insert(format!("{bucket}/{key}"), body.to_string());
    }
}

impl ObjectStore for EventualObjectStore {
    fn get_object(&self, bucket: &str, key: &str) -> Result<String, AdapterError> {
        self.0
            .read(&format!("{bucket}/{key}"))
            .ok_or_else(|| AdapterError::NotFound(format!("s3://{bucket}/{key}")))
    }

    fn put_object(&self, bucket: &str, key: &str, body: &str) -> Result<(), AdapterError> {
        self.seed(bucket, key, body);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub queue_url: String,
    pub body: String,
    pub delay_seconds: Option<i32>,
}

#[derive(Default)]
pub struct RecordingQueue {
    pub sent: Mutex<Vec<SentMessage>>,
}

impl RecordingQueue {
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("poisoned mutex").clone()
    }
}

impl MessageQueue for RecordingQueue {
    fn send_message(
        &self,
        queue_url: &str,
        body: &str,
        delay_seconds: Option<i32>,
    ) -> Result<String, AdapterError> {
        let mut sent = self.sent.lock().expect("poisoned mutex");
        sent.push(SentMessage {
            queue_url: queue_url.to_string(),
            body: body.to_string(),
            delay_seconds,
        });
        Ok(format!("message-{}", sent.len()))
    }

    fn ensure_queue(&self, queue_name: &str) -> Result<String, AdapterError> {
        Ok(format!("https://sqs.us-east-1.amazonaws.com/123456789012/{queue_name}"))
    }
}

pub struct EventualOrderStatuses(pub EventualMap<String>);

impl EventualOrderStatuses {
    pub fn new(lag: usize) -> Self {
        Self(EventualMap::new(lag))
    }
}

impl OrderStatusStore for EventualOrderStatuses {
    fn order_status(&self, order_id: &str) -> Result<Option<String>, AdapterError> {
        Ok(self.0.read(order_id))
    }
}

/// Runs each execution inline by recording its input under the order id.
pub struct InlineWorkflow<'a> {
    pub statuses: &'a EventualOrderStatuses,
    pub status: &'static str,
}

impl WorkflowStarter for InlineWorkflow<'_> {
    fn start_execution(&self, name: &str, input: &str) -> Result<StartedExecution, AdapterError> {
        let order: serde_json::Value = serde_json::from_str(input)
            .map_err(|error| AdapterError::Serialization(error.to_string()))?;
        let order_id = order["orderId"]
            .as_str()
            .ok_or_else(|| AdapterError::Serialization("input without orderId".into()))?;
        self.statuses.0.insert(order_id, self.status.to_string());
        Ok(StartedExecution {
            execution_arn: format!("arn:aws:states:us-east-1:123456789012:execution:orders:{name}"),
            start_epoch_seconds: 0,
        })
    }
}
