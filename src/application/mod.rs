//! Application layer: aggregation, formatting and the transaction service.
//!
//! `aggregation` and `formatter` are pure; `service` wires them to a
//! `TransactionStore`.

pub mod aggregation;
pub mod formatter;
pub mod service;
