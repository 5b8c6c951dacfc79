use super::amount::Total;
use super::country::Country;
use super::currency::Currency;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregate of the transactions recorded on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_amount: Total,
    pub transaction_count: usize,
    /// Currency of the last transaction folded into this day.
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyBalance {
    pub currency: Currency,
    pub amount: Total,
    pub transaction_count: usize,
}

/// Per-currency totals for a single country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryBalance {
    pub country: Country,
    /// Ordered by first appearance of each currency in the input.
    pub balances: Vec<CurrencyBalance>,
    pub total_transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionStatistics {
    pub total_transactions: usize,
    pub total_countries: usize,
    pub total_currencies: usize,
    pub average_transaction_amount: Decimal,
}
