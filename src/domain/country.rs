use super::currency::Currency;
use crate::error::{FinboardError, Result};
use serde::{Deserialize, Serialize};

struct CountryData {
    code: &'static str,
    name: &'static str,
    flag: &'static str,
    currency_codes: &'static [&'static str],
}

const SUPPORTED_COUNTRIES: [CountryData; 3] = [
    CountryData {
        code: "BR",
        name: "Brasil",
        flag: "🇧🇷",
        currency_codes: &["BRL", "USD"],
    },
    CountryData {
        code: "CO",
        name: "Colômbia",
        flag: "🇨🇴",
        currency_codes: &["COP", "USD"],
    },
    CountryData {
        code: "US",
        name: "Estados Unidos",
        flag: "🇺🇸",
        currency_codes: &["USD"],
    },
];

/// Countries offered for selection when nothing else is configured.
const DEFAULT_COUNTRY_CODES: [&str; 2] = ["BR", "CO"];

/// A country and the currencies transactions may be recorded in.
///
/// The first currency is the primary one and is used as the default when
/// entering a new transaction. Deserialization only reads the code and
/// resolves it against the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CountryRecord")]
pub struct Country {
    code: String,
    name: String,
    flag: String,
    currencies: Vec<Currency>,
}

impl Country {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        flag: impl Into<String>,
        currencies: Vec<Currency>,
    ) -> Result<Self> {
        let code = code.into();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FinboardError::ValidationError(
                "Country code must be a 2-letter string".to_string(),
            ));
        }
        if currencies.is_empty() {
            return Err(FinboardError::ValidationError(format!(
                "No supported currencies found for country: {code}"
            )));
        }
        Ok(Self {
            code,
            name: name.into(),
            flag: flag.into(),
            currencies,
        })
    }

    /// Looks up a supported country by its two-letter code.
    pub fn from_code(code: &str) -> Result<Self> {
        let data = SUPPORTED_COUNTRIES
            .iter()
            .find(|d| d.code == code)
            .ok_or_else(|| {
                FinboardError::ValidationError(format!("Unsupported country code: {code}"))
            })?;
        let currencies = data
            .currency_codes
            .iter()
            .filter_map(|c| Currency::from_code(c).ok())
            .collect();
        Self::new(data.code, data.name, data.flag, currencies)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(name: &str) -> Option<Self> {
        let wanted = name.to_lowercase();
        SUPPORTED_COUNTRIES
            .iter()
            .find(|d| d.name.to_lowercase() == wanted)
            .and_then(|d| Self::from_code(d.code).ok())
    }

    pub fn is_supported(code: &str) -> bool {
        SUPPORTED_COUNTRIES.iter().any(|d| d.code == code)
    }

    pub fn supported() -> Vec<Self> {
        SUPPORTED_COUNTRIES
            .iter()
            .filter_map(|d| Self::from_code(d.code).ok())
            .collect()
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_COUNTRY_CODES
            .iter()
            .filter_map(|code| Self::from_code(code).ok())
            .collect()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn primary_currency(&self) -> &Currency {
        // Construction rejects an empty currency list.
        &self.currencies[0]
    }

    pub fn supports_currency(&self, code: &str) -> bool {
        self.currencies.iter().any(|c| c.code() == code)
    }
}

#[derive(Deserialize)]
struct CountryRecord {
    code: String,
}

impl TryFrom<CountryRecord> for Country {
    type Error = FinboardError;

    fn try_from(record: CountryRecord) -> Result<Self> {
        Self::from_code(&record.code)
    }
}
