use super::amount::Amount;
use super::country::Country;
use super::currency::Currency;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input for recording a new transaction.
///
/// Currency and country are given by code and resolved against the
/// supported reference data when the transaction is created.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    pub amount: Decimal,
    #[serde(alias = "currency")]
    pub currency_code: String,
    pub date: NaiveDate,
    #[serde(alias = "country")]
    pub country_code: String,
}

/// A partial update. Fields left as `None` keep their previous value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub currency_code: Option<String>,
    pub date: Option<NaiveDate>,
    pub country_code: Option<String>,
}

/// A single recorded monetary movement.
///
/// Values are immutable: the `with_*` and [`Transaction::apply`] methods
/// return a new transaction that keeps the same id and creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: String,
    description: Option<String>,
    amount: Amount,
    currency: Currency,
    date: NaiveDate,
    country: Country,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Validates `data` and builds a transaction with a fresh id.
    pub fn create(data: NewTransaction) -> Result<Self> {
        let amount = Amount::new(data.amount)?;
        let currency = Currency::from_code(&data.currency_code)?;
        let country = Country::from_code(&data.country_code)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            description: data.description,
            amount,
            currency,
            date: data.date,
            country,
            created_at: Utc::now(),
        })
    }

    /// Merges `patch` over this transaction and re-validates the result.
    pub fn apply(&self, patch: TransactionPatch) -> Result<Self> {
        let amount = match patch.amount {
            Some(value) => Amount::new(value)?,
            None => self.amount,
        };
        let currency = match patch.currency_code {
            Some(code) => Currency::from_code(&code)?,
            None => self.currency.clone(),
        };
        let country = match patch.country_code {
            Some(code) => Country::from_code(&code)?,
            None => self.country.clone(),
        };
        Ok(Self {
            id: self.id.clone(),
            description: patch.description.or_else(|| self.description.clone()),
            amount,
            currency,
            date: patch.date.unwrap_or(self.date),
            country,
            created_at: self.created_at,
        })
    }

    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self.clone()
        }
    }

    pub fn with_amount(&self, amount: Decimal) -> Result<Self> {
        Ok(Self {
            amount: Amount::new(amount)?,
            ..self.clone()
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn country(&self) -> &Country {
        &self.country
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_from_country(&self, country_code: &str) -> bool {
        self.country.code() == country_code
    }

    pub fn has_currency(&self, currency_code: &str) -> bool {
        self.currency.code() == currency_code
    }

    pub fn is_on_date(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinboardError;
    use rust_decimal_macros::dec;

    fn new_data(amount: Decimal) -> NewTransaction {
        NewTransaction {
            description: Some("Test transaction".to_string()),
            amount,
            currency_code: "BRL".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            country_code: "BR".to_string(),
        }
    }

    #[test]
    fn test_create_valid_transaction() {
        let tx = Transaction::create(new_data(dec!(100.5))).unwrap();
        assert!(!tx.id().is_empty());
        assert_eq!(tx.description(), Some("Test transaction"));
        assert_eq!(tx.amount().value(), dec!(100.5));
        assert_eq!(tx.currency().code(), "BRL");
        assert_eq!(tx.country().code(), "BR");
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        for amount in [dec!(0), dec!(-100)] {
            assert!(matches!(
                Transaction::create(new_data(amount)),
                Err(FinboardError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn test_create_rejects_unsupported_codes() {
        let mut data = new_data(dec!(10));
        data.currency_code = "JPY".to_string();
        assert!(Transaction::create(data).is_err());

        let mut data = new_data(dec!(10));
        data.country_code = "AR".to_string();
        assert!(Transaction::create(data).is_err());
    }

    #[test]
    fn test_predicates() {
        let tx = Transaction::create(new_data(dec!(100.5))).unwrap();
        assert!(tx.is_from_country("BR"));
        assert!(!tx.is_from_country("CO"));
        assert!(tx.has_currency("BRL"));
        assert!(!tx.has_currency("USD"));
        assert!(tx.is_on_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(!tx.is_on_date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()));
    }

    #[test]
    fn test_updates_are_immutable() {
        let tx = Transaction::create(new_data(dec!(100))).unwrap();

        let described = tx.with_description("New description");
        assert_eq!(described.description(), Some("New description"));
        assert_eq!(described.id(), tx.id());
        assert_eq!(tx.description(), Some("Test transaction"));

        let bigger = tx.with_amount(dec!(200)).unwrap();
        assert_eq!(bigger.amount().value(), dec!(200));
        assert_eq!(tx.amount().value(), dec!(100));

        assert!(tx.with_amount(dec!(-100)).is_err());
        assert!(tx.with_amount(dec!(0)).is_err());
    }

    #[test]
    fn test_apply_patch_keeps_identity() {
        let tx = Transaction::create(new_data(dec!(100))).unwrap();
        let patched = tx
            .apply(TransactionPatch {
                amount: Some(dec!(42)),
                currency_code: Some("USD".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(patched.id(), tx.id());
        assert_eq!(patched.created_at(), tx.created_at());
        assert_eq!(patched.amount().value(), dec!(42));
        assert_eq!(patched.currency().code(), "USD");
        assert_eq!(patched.description(), tx.description());
        assert_eq!(patched.date(), tx.date());
    }

    #[test]
    fn test_serialization_round_trip() {
        let tx = Transaction::create(new_data(dec!(100))).unwrap();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["description"], "Test transaction");

        let restored: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(restored, tx);
    }

    #[test]
    fn test_deserialization_rejects_unsupported_reference_data() {
        let tx = Transaction::create(new_data(dec!(100))).unwrap();

        let mut json = serde_json::to_value(&tx).unwrap();
        json["currency"] = serde_json::json!({"code": "JPY", "name": "Yen", "symbol": "¥"});
        assert!(serde_json::from_value::<Transaction>(json).is_err());

        let mut json = serde_json::to_value(&tx).unwrap();
        json["country"] = serde_json::json!({"code": "ZZ", "name": "Nowhere", "currencies": []});
        assert!(serde_json::from_value::<Transaction>(json).is_err());

        let mut json = serde_json::to_value(&tx).unwrap();
        json["amount"] = serde_json::json!("-5");
        assert!(serde_json::from_value::<Transaction>(json).is_err());
    }

    #[test]
    fn test_new_transaction_csv_deserialization() {
        let csv = "description,amount,currency,date,country\n,85000,COP,2025-06-11,CO";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let data: NewTransaction = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(data.description, None);
        assert_eq!(data.amount, dec!(85000));
        assert_eq!(data.currency_code, "COP");
        assert_eq!(data.country_code, "CO");
    }
}
