use crate::application::formatter::{
    format_currency, format_date, format_day_month, format_number,
};
use crate::domain::country::Country;
use crate::domain::currency::Currency;
use crate::domain::summary::{CountryBalance, DailySummary, TransactionStatistics};
use crate::domain::transaction::Transaction;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct CountryRates<'a> {
    #[serde(flatten)]
    country: &'a Country,
    usd_rates: Vec<UsdRate<'a>>,
}

#[derive(Serialize)]
struct UsdRate<'a> {
    currency: &'a str,
    rate: Decimal,
}

impl<'a> CountryRates<'a> {
    fn new(country: &'a Country) -> Self {
        let usd_rates = country
            .currencies()
            .iter()
            .filter_map(|c| {
                c.usd_rate().map(|rate| UsdRate {
                    currency: c.code(),
                    rate,
                })
            })
            .collect();
        Self { country, usd_rates }
    }
}

/// Renders dashboard views either as locale-formatted text or as JSON.
///
/// Text output is formatted for the country being viewed; JSON output is the
/// raw serialized model and ignores locale.
pub struct ReportWriter<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        writeln!(self.writer)?;
        Ok(())
    }

    /// Lists countries with their currencies and the USD exchange rate of each.
    pub fn write_countries(&mut self, countries: &[Country]) -> Result<()> {
        if self.format == OutputFormat::Json {
            let rates: Vec<CountryRates> = countries.iter().map(CountryRates::new).collect();
            return self.write_json(&rates);
        }
        for country in countries {
            let currencies: Vec<&str> = country.currencies().iter().map(|c| c.code()).collect();
            writeln!(
                self.writer,
                "{} {} {} ({})",
                country.flag(),
                country.code(),
                country.name(),
                currencies.join(", ")
            )?;
            for currency in country.currencies() {
                self.write_usd_rate(currency, country)?;
            }
        }
        Ok(())
    }

    fn write_usd_rate(&mut self, currency: &Currency, country: &Country) -> Result<()> {
        if let Some(rate) = currency.usd_rate() {
            writeln!(
                self.writer,
                "    1 USD = {} {}",
                format_number(rate, country),
                currency.code()
            )?;
        }
        Ok(())
    }

    pub fn write_transactions(
        &mut self,
        transactions: &[Transaction],
        country: &Country,
    ) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.write_json(transactions);
        }
        if transactions.is_empty() {
            writeln!(self.writer, "No transactions for {}", country.name())?;
            return Ok(());
        }
        for tx in transactions {
            writeln!(
                self.writer,
                "{}  {:<30}  {}  [{}]",
                format_date(tx.date(), country)?,
                tx.description().unwrap_or("-"),
                format_currency(tx.amount().value(), tx.currency(), country),
                tx.id()
            )?;
        }
        Ok(())
    }

    pub fn write_daily_summary(
        &mut self,
        days: &[DailySummary],
        country: &Country,
    ) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.write_json(days);
        }
        if days.is_empty() {
            writeln!(self.writer, "No transactions for {}", country.name())?;
            return Ok(());
        }
        for day in days {
            writeln!(
                self.writer,
                "{}  {}  ({} {})",
                format_day_month(day.date, country)?,
                format_currency(day.total_amount.value(), &day.currency, country),
                day.transaction_count,
                plural(day.transaction_count, "transaction", "transactions")
            )?;
        }
        Ok(())
    }

    pub fn write_country_balance(
        &mut self,
        balance: Option<&CountryBalance>,
        country: &Country,
    ) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.write_json(&balance);
        }
        let Some(balance) = balance else {
            writeln!(self.writer, "No transactions for {}", country.name())?;
            return Ok(());
        };
        writeln!(
            self.writer,
            "{} {}: {} {}",
            balance.country.flag(),
            balance.country.name(),
            balance.total_transactions,
            plural(balance.total_transactions, "transaction", "transactions")
        )?;
        for entry in &balance.balances {
            writeln!(
                self.writer,
                "  {}  {}  ({})",
                entry.currency.code(),
                format_currency(entry.amount.value(), &entry.currency, country),
                entry.transaction_count
            )?;
        }
        Ok(())
    }

    pub fn write_statistics(
        &mut self,
        stats: &TransactionStatistics,
        country: &Country,
    ) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.write_json(stats);
        }
        writeln!(self.writer, "Transactions: {}", stats.total_transactions)?;
        writeln!(self.writer, "Countries: {}", stats.total_countries)?;
        writeln!(self.writer, "Currencies: {}", stats.total_currencies)?;
        writeln!(
            self.writer,
            "Average amount: {}",
            format_number(stats.average_transaction_amount, country)
        )?;
        Ok(())
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
