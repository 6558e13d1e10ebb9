//! Shared contracts for the serverless samples.
//!
//! This crate owns request/response shapes, record types, AppSync resolver
//! mapping, event schema checks and the polling helper used to await
//! eventually consistent writes. It intentionally excludes AWS SDK and Lambda
//! runtime concerns, which live in `samples_lambda`.

pub mod contract;
pub mod customer;
pub mod order;
pub mod polling;
pub mod resolvers;
pub mod schema;
pub mod ticket;
pub mod transformation;
