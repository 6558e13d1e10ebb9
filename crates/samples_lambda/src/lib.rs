//! AWS-facing adapters, handlers and Lambda binaries for the serverless samples.
//!
//! Handlers are synchronous and depend only on the adapter traits, so they can
//! be exercised with in-memory fakes. The binaries under `src/bin` wire the
//! AWS SDK implementations in once per cold start.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
