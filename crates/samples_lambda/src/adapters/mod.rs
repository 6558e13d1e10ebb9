//! Storage, queue and workflow seams used by the handlers.
//!
//! Each trait is synchronous; the AWS SDK implementations bridge their async
//! calls onto the current Tokio runtime with [`block_on`].

pub mod bucket_lister;
pub mod customer_store;
mod dynamo;
pub mod event_publisher;
pub mod message_queue;
pub mod object_store;
pub mod order_status;
pub mod record_table;
pub mod ticket_store;
pub mod workflow;

use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("service call failed: {0}")]
    Service(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Runs an SDK future to completion from synchronous handler code.
///
/// Requires a multi-threaded Tokio runtime, which `#[tokio::main]` provides.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
