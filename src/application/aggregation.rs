//! Pure folds over transaction lists.
//!
//! Nothing here touches the store: callers pass a snapshot and get fresh
//! values back, so every function is safe to call repeatedly or in parallel.

use crate::domain::amount::Total;
use crate::domain::summary::{
    CountryBalance, CurrencyBalance, DailySummary, TransactionStatistics,
};
use crate::domain::transaction::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

/// Groups transactions by calendar date, ascending.
///
/// Amounts are summed without regard to currency; each day reports the
/// currency of the last transaction folded into it.
pub fn calculate_daily_summary(transactions: &[Transaction]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

    for tx in transactions {
        days.entry(tx.date())
            .and_modify(|day| {
                day.total_amount += tx.amount();
                day.transaction_count += 1;
                day.currency = tx.currency().clone();
            })
            .or_insert_with(|| DailySummary {
                date: tx.date(),
                total_amount: tx.amount().into(),
                transaction_count: 1,
                currency: tx.currency().clone(),
            });
    }

    days.into_values().collect()
}

/// Per-currency balance of a country's transactions.
///
/// Returns `None` when there is nothing to aggregate. The country is taken
/// from the first transaction.
pub fn calculate_country_balance(transactions: &[Transaction]) -> Option<CountryBalance> {
    let first = transactions.first()?;
    let mut balances: Vec<CurrencyBalance> = Vec::new();

    for tx in transactions {
        match balances
            .iter_mut()
            .find(|b| b.currency.code() == tx.currency().code())
        {
            Some(balance) => {
                balance.amount += tx.amount();
                balance.transaction_count += 1;
            }
            None => balances.push(CurrencyBalance {
                currency: tx.currency().clone(),
                amount: tx.amount().into(),
                transaction_count: 1,
            }),
        }
    }

    Some(CountryBalance {
        country: first.country().clone(),
        balances,
        total_transactions: transactions.len(),
    })
}

pub fn calculate_statistics(transactions: &[Transaction]) -> TransactionStatistics {
    let countries: HashSet<&str> = transactions.iter().map(|t| t.country().code()).collect();
    let currencies: HashSet<&str> = transactions.iter().map(|t| t.currency().code()).collect();
    let total: Total = transactions.iter().map(|t| Total::from(t.amount())).sum();

    let average_transaction_amount = if transactions.is_empty() {
        Decimal::ZERO
    } else {
        total.value() / Decimal::from(transactions.len())
    };

    TransactionStatistics {
        total_transactions: transactions.len(),
        total_countries: countries.len(),
        total_currencies: currencies.len(),
        average_transaction_amount,
    }
}

/// Sum of the amounts recorded in `currency_code` for `country_code`.
pub fn total_for_currency(
    transactions: &[Transaction],
    country_code: &str,
    currency_code: &str,
) -> Total {
    transactions
        .iter()
        .filter(|t| t.is_from_country(country_code) && t.has_currency(currency_code))
        .map(|t| Total::from(t.amount()))
        .sum()
}

/// Transactions dated within `from..=to`, in input order.
pub fn filter_date_range(
    transactions: &[Transaction],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| (from..=to).contains(&t.date()))
        .cloned()
        .collect()
}
