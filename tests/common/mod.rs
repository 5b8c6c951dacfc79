#![allow(dead_code)]

use chrono::NaiveDate;
use finboard::domain::transaction::{NewTransaction, Transaction};
use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Error;
use std::path::Path;

const COUNTRY_CURRENCIES: [(&str, &[&str]); 3] = [
    ("BR", &["BRL", "USD"]),
    ("CO", &["COP", "USD"]),
    ("US", &["USD"]),
];

/// Writes `rows` valid Brazilian entries, one per day starting 2025-06-01.
pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["description", "amount", "currency", "date", "country"])?;

    let start = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid start date");
    for i in 0..rows {
        let date = start + chrono::Duration::days(i as i64);
        wtr.write_record([
            format!("Entry {i}"),
            "10.5".to_string(),
            "BRL".to_string(),
            date.to_string(),
            "BR".to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// A random valid transaction for `country` dated within June 2025.
pub fn random_transaction(rng: &mut StdRng, country: &str) -> Transaction {
    let currencies = COUNTRY_CURRENCIES
        .iter()
        .find(|(code, _)| *code == country)
        .map(|(_, currencies)| *currencies)
        .expect("supported country");
    let currency = currencies[rng.gen_range(0..currencies.len())];
    let cents: i64 = rng.gen_range(1..10_000_000);
    let day: u32 = rng.gen_range(1..=30);

    Transaction::create(NewTransaction {
        description: None,
        amount: Decimal::new(cents, 2),
        currency_code: currency.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, day).expect("valid June date"),
        country_code: country.to_string(),
    })
    .expect("generated transaction is valid")
}
