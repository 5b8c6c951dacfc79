use crate::error::{FinboardError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference data for every currency the ledger accepts: (code, name, symbol).
const SUPPORTED_CURRENCIES: [(&str, &str, &str); 4] = [
    ("BRL", "Real Brasileiro", "R$"),
    ("COP", "Peso Colombiano", "$"),
    ("USD", "Dólar Americano", "$"),
    ("EUR", "Euro", "€"),
];

/// A currency with its display metadata.
///
/// Two currencies are equal when their codes are equal, regardless of the
/// display name or symbol they carry. Deserialization only reads the code
/// and resolves it against the supported set.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurrencyRecord")]
pub struct Currency {
    code: String,
    name: String,
    symbol: String,
}

impl Currency {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Result<Self> {
        let currency = Self {
            code: code.into(),
            name: name.into(),
            symbol: symbol.into(),
        };
        if currency.code.len() != 3 || !currency.code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FinboardError::ValidationError(
                "Currency code must be a 3-letter string".to_string(),
            ));
        }
        if currency.name.is_empty() {
            return Err(FinboardError::ValidationError(
                "Currency name is required".to_string(),
            ));
        }
        if currency.symbol.is_empty() {
            return Err(FinboardError::ValidationError(
                "Currency symbol is required".to_string(),
            ));
        }
        Ok(currency)
    }

    /// Looks up a supported currency by its ISO code.
    pub fn from_code(code: &str) -> Result<Self> {
        SUPPORTED_CURRENCIES
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(c, n, s)| Self {
                code: (*c).to_string(),
                name: (*n).to_string(),
                symbol: (*s).to_string(),
            })
            .ok_or_else(|| {
                FinboardError::ValidationError(format!("Unsupported currency code: {code}"))
            })
    }

    pub fn is_supported(code: &str) -> bool {
        SUPPORTED_CURRENCIES.iter().any(|(c, _, _)| *c == code)
    }

    pub fn supported() -> Vec<Self> {
        SUPPORTED_CURRENCIES
            .iter()
            .filter_map(|(code, _, _)| Self::from_code(code).ok())
            .collect()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Units of this currency bought by one US dollar, when a rate is known.
    pub fn usd_rate(&self) -> Option<Decimal> {
        match self.code.as_str() {
            "USD" => Some(Decimal::ONE),
            "BRL" => Some(dec!(5.5)),
            "COP" => Some(dec!(4000)),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct CurrencyRecord {
    code: String,
}

impl TryFrom<CurrencyRecord> for Currency {
    type Error = FinboardError;

    fn try_from(record: CurrencyRecord) -> Result<Self> {
        Self::from_code(&record.code)
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
