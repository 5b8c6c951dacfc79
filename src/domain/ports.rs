use super::transaction::{NewTransaction, Transaction, TransactionPatch};
use crate::error::Result;
use async_trait::async_trait;

/// Storage backend for transactions.
///
/// Listing methods return records newest first.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Validates and records a new transaction.
    async fn create(&self, data: NewTransaction) -> Result<Transaction>;
    async fn get(&self, id: &str) -> Result<Option<Transaction>>;
    /// Fails with `NotFoundError` when `id` is unknown.
    async fn update(&self, id: &str, patch: TransactionPatch) -> Result<Transaction>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
    async fn list_all(&self) -> Result<Vec<Transaction>>;
    async fn list_by_country(&self, country_code: &str) -> Result<Vec<Transaction>>;
    async fn list_by_currency(&self, currency_code: &str) -> Result<Vec<Transaction>>;
    async fn clear(&self) -> Result<()>;
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type TransactionStoreFactory = Box<dyn Fn() -> TransactionStoreBox + Send + Sync>;
