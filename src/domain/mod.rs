//! Domain model: reference data, validated transaction values, derived
//! summaries and the storage port.

pub mod amount;
pub mod country;
pub mod currency;
pub mod ports;
pub mod summary;
pub mod transaction;
