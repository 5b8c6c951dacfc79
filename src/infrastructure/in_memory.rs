use crate::domain::ports::TransactionStore;
use crate::domain::transaction::{NewTransaction, Transaction, TransactionPatch};
use crate::error::{FinboardError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Options for building an [`InMemoryTransactionStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Artificial delay applied before every store call.
    pub latency: Option<Duration>,
    /// Preload the sample transactions.
    pub seed: bool,
}

/// A thread-safe in-memory store for transactions.
///
/// Uses `Arc<RwLock<Vec<Transaction>>>` so clones share the same records.
/// New records are inserted at the front, which keeps listings newest first.
/// An optional latency simulates a remote backend.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Vec<Transaction>>>,
    latency: Option<Duration>,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Creates a store preloaded with [`sample_transactions`].
    pub fn seeded() -> Result<Self> {
        Ok(Self {
            transactions: Arc::new(RwLock::new(sample_transactions()?)),
            latency: None,
        })
    }

    pub fn from_options(options: StoreOptions) -> Result<Self> {
        let mut store = if options.seed {
            Self::seeded()?
        } else {
            Self::new()
        };
        store.latency = options.latency;
        Ok(store)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    async fn filtered<F>(&self, predicate: F) -> Result<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool + Send,
    {
        self.simulate_latency().await;
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().filter(|t| predicate(*t)).cloned().collect())
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn create(&self, data: NewTransaction) -> Result<Transaction> {
        self.simulate_latency().await;
        let tx = Transaction::create(data)?;
        let mut transactions = self.transactions.write().await;
        transactions.insert(0, tx.clone());
        debug!(id = tx.id(), country = tx.country().code(), "Transaction created");
        Ok(tx)
    }

    async fn get(&self, id: &str) -> Result<Option<Transaction>> {
        self.simulate_latency().await;
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().find(|t| t.id() == id).cloned())
    }

    async fn update(&self, id: &str, patch: TransactionPatch) -> Result<Transaction> {
        self.simulate_latency().await;
        let mut transactions = self.transactions.write().await;
        let Some(slot) = transactions.iter_mut().find(|t| t.id() == id) else {
            warn!(id, "Update requested for unknown transaction");
            return Err(FinboardError::NotFoundError(format!(
                "Transaction with id {id} not found"
            )));
        };
        let updated = slot.apply(patch)?;
        *slot = updated.clone();
        debug!(id, "Transaction updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.simulate_latency().await;
        let mut transactions = self.transactions.write().await;
        let before = transactions.len();
        transactions.retain(|t| t.id() != id);
        let removed = transactions.len() < before;
        if removed {
            debug!(id, "Transaction deleted");
        } else {
            warn!(id, "Delete requested for unknown transaction");
        }
        Ok(removed)
    }

    async fn list_all(&self) -> Result<Vec<Transaction>> {
        self.filtered(|_| true).await
    }

    async fn list_by_country(&self, country_code: &str) -> Result<Vec<Transaction>> {
        self.filtered(|t| t.is_from_country(country_code)).await
    }

    async fn list_by_currency(&self, currency_code: &str) -> Result<Vec<Transaction>> {
        self.filtered(|t| t.has_currency(currency_code)).await
    }

    async fn clear(&self) -> Result<()> {
        self.simulate_latency().await;
        let mut transactions = self.transactions.write().await;
        transactions.clear();
        debug!("Transaction store cleared");
        Ok(())
    }
}

/// The demo data set shown on first launch, newest first.
pub fn sample_transactions() -> Result<Vec<Transaction>> {
    let rows = [
        ("Compra supermercado", dec!(250.75), "BRL", (2025, 6, 12), "BR"),
        ("Freelance web development", dec!(1500.00), "BRL", (2025, 6, 11), "BR"),
        ("Almuerzo restaurante", dec!(85000), "COP", (2025, 6, 11), "CO"),
        ("Salary payment", dec!(3500.00), "USD", (2025, 6, 10), "BR"),
        ("Consultoría técnica", dec!(450000), "COP", (2025, 6, 9), "CO"),
        ("Consultoría técnica", dec!(100000), "BRL", (2025, 6, 8), "BR"),
    ];

    rows.into_iter()
        .map(|(description, amount, currency, (y, m, d), country)| {
            let date = NaiveDate::from_ymd_opt(y, m, d)
                .ok_or_else(|| FinboardError::ParseError(format!("Invalid date {y}-{m}-{d}")))?;
            Transaction::create(NewTransaction {
                description: Some(description.to_string()),
                amount,
                currency_code: currency.to_string(),
                date,
                country_code: country.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn brl(amount: Decimal, day: u32) -> NewTransaction {
        NewTransaction {
            description: None,
            amount,
            currency_code: "BRL".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            country_code: "BR".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryTransactionStore::new();
        let tx = store.create(brl(dec!(100.0), 1)).await.unwrap();

        let retrieved = store.get(tx.id()).await.unwrap().unwrap();
        assert_eq!(retrieved, tx);
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let store = InMemoryTransactionStore::new();
        let result = store.create(brl(dec!(0), 1)).await;
        assert!(matches!(result, Err(FinboardError::ValidationError(_))));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let store = InMemoryTransactionStore::new();
        let first = store.create(brl(dec!(1), 1)).await.unwrap();
        let second = store.create(brl(dec!(2), 2)).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all[0].id(), second.id());
        assert_eq!(all[1].id(), first.id());
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_position() {
        let store = InMemoryTransactionStore::new();
        let older = store.create(brl(dec!(1), 1)).await.unwrap();
        store.create(brl(dec!(2), 2)).await.unwrap();

        let patch = TransactionPatch {
            description: Some("Edited".to_string()),
            amount: Some(dec!(10)),
            ..Default::default()
        };
        let updated = store.update(older.id(), patch).await.unwrap();
        assert_eq!(updated.id(), older.id());
        assert_eq!(updated.created_at(), older.created_at());
        assert_eq!(updated.amount().value(), dec!(10));

        let all = store.list_all().await.unwrap();
        assert_eq!(all[1], updated);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = InMemoryTransactionStore::new();
        let result = store.update("nope", TransactionPatch::default()).await;
        assert!(matches!(result, Err(FinboardError::NotFoundError(_))));
    }

    #[tokio::test]
    async fn test_update_invalid_patch_leaves_record() {
        let store = InMemoryTransactionStore::new();
        let tx = store.create(brl(dec!(5), 1)).await.unwrap();
        let patch = TransactionPatch {
            amount: Some(dec!(-5)),
            ..Default::default()
        };
        assert!(store.update(tx.id(), patch).await.is_err());
        assert_eq!(store.get(tx.id()).await.unwrap().unwrap(), tx);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryTransactionStore::new();
        let tx = store.create(brl(dec!(5), 1)).await.unwrap();
        assert!(store.delete(tx.id()).await.unwrap());
        assert!(!store.delete(tx.id()).await.unwrap());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seeded_filters() {
        let store = InMemoryTransactionStore::seeded().unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 6);
        assert_eq!(store.list_by_country("BR").await.unwrap().len(), 4);
        assert_eq!(store.list_by_country("CO").await.unwrap().len(), 2);
        assert_eq!(store.list_by_currency("USD").await.unwrap().len(), 1);

        store.clear().await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = InMemoryTransactionStore::new();
        let handle = store.clone();
        store.create(brl(dec!(1), 1)).await.unwrap();
        assert_eq!(handle.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let store = InMemoryTransactionStore::from_options(StoreOptions {
            latency: Some(Duration::from_millis(20)),
            seed: true,
        })
        .unwrap();
        let started = tokio::time::Instant::now();
        assert_eq!(store.list_all().await.unwrap().len(), 6);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
