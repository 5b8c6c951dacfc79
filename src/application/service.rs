use super::aggregation::{
    calculate_country_balance, calculate_daily_summary, calculate_statistics,
    filter_date_range, total_for_currency,
};
use super::formatter::parse_date;
use crate::domain::amount::Total;
use crate::domain::country::Country;
use crate::domain::ports::TransactionStoreBox;
use crate::domain::summary::{CountryBalance, DailySummary, TransactionStatistics};
use crate::domain::transaction::{NewTransaction, Transaction, TransactionPatch};
use crate::error::{FinboardError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Raw values as typed into the transaction form.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub description: String,
    pub amount: String,
    pub currency: String,
    pub date: String,
}

/// Entry point for recording and querying transactions.
///
/// `TransactionService` owns the storage backend and combines store queries
/// with the pure aggregation functions. Store errors are returned unchanged.
pub struct TransactionService {
    store: TransactionStoreBox,
}

impl TransactionService {
    pub fn new(store: TransactionStoreBox) -> Self {
        Self { store }
    }

    pub async fn create(&self, data: NewTransaction) -> Result<Transaction> {
        self.store.create(data).await
    }

    /// Converts form strings and records the transaction for `country`.
    pub async fn create_from_form(
        &self,
        form: FormInput,
        country: &Country,
    ) -> Result<Transaction> {
        let amount = Decimal::from_str(form.amount.trim()).map_err(|_| {
            FinboardError::ValidationError(format!("Invalid amount: {}", form.amount))
        })?;
        let date = parse_date(&form.date, country)?;
        let description = Some(form.description.trim().to_string()).filter(|d| !d.is_empty());

        self.store
            .create(NewTransaction {
                description,
                amount,
                currency_code: form.currency,
                date,
                country_code: country.code().to_string(),
            })
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Transaction>> {
        self.store.get(id).await
    }

    pub async fn update(&self, id: &str, patch: TransactionPatch) -> Result<Transaction> {
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.store.delete(id).await
    }

    pub async fn all(&self) -> Result<Vec<Transaction>> {
        self.store.list_all().await
    }

    pub async fn by_country(&self, country_code: &str) -> Result<Vec<Transaction>> {
        self.store.list_by_country(country_code).await
    }

    pub async fn by_currency(&self, currency_code: &str) -> Result<Vec<Transaction>> {
        self.store.list_by_currency(currency_code).await
    }

    pub async fn daily_summary_by_country(&self, country_code: &str) -> Result<Vec<DailySummary>> {
        let transactions = self.by_country(country_code).await?;
        Ok(calculate_daily_summary(&transactions))
    }

    /// `None` when the country has no transactions yet.
    pub async fn country_balance(&self, country_code: &str) -> Result<Option<CountryBalance>> {
        let transactions = self.by_country(country_code).await?;
        Ok(calculate_country_balance(&transactions))
    }

    pub async fn total_balance(&self, country_code: &str, currency_code: &str) -> Result<Total> {
        let transactions = self.all().await?;
        Ok(total_for_currency(&transactions, country_code, currency_code))
    }

    pub async fn transactions_in_date_range(
        &self,
        country_code: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let transactions = self.by_country(country_code).await?;
        Ok(filter_date_range(&transactions, from, to))
    }

    /// Statistics for one country, or across all countries when `None`.
    pub async fn statistics(&self, country_code: Option<&str>) -> Result<TransactionStatistics> {
        let transactions = match country_code {
            Some(code) => self.by_country(code).await?,
            None => self.all().await?,
        };
        Ok(calculate_statistics(&transactions))
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await
    }
}
