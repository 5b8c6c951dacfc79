//! Locale-aware rendering of amounts and dates.
//!
//! Each supported country maps to a [`LocaleProfile`] in a static table.
//! Lookups never fail: unknown country codes get the Brazilian profile.

use crate::domain::country::Country;
use crate::domain::currency::Currency;
use crate::error::{FinboardError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

const NO_BREAK_SPACE: &str = "\u{a0}";
const ISO_DATE: &str = "%Y-%m-%d";

/// Formatting rules for one locale.
#[derive(Debug, PartialEq, Eq)]
pub struct LocaleProfile {
    pub country_code: &'static str,
    pub locale: &'static str,
    /// Currency whose own symbol is used unqualified.
    pub home_currency: &'static str,
    pub grouping_separator: char,
    pub decimal_separator: char,
    pub min_fraction_digits: u32,
    pub max_fraction_digits: u32,
    /// Placed between the currency symbol and the number.
    pub symbol_separator: &'static str,
    /// Placed between a percentage and the `%` sign.
    pub percent_separator: &'static str,
    /// `chrono` strftime pattern for full dates.
    pub date_pattern: &'static str,
    pub day_month_pattern: &'static str,
}

static PROFILES: [LocaleProfile; 3] = [
    LocaleProfile {
        country_code: "BR",
        locale: "pt-BR",
        home_currency: "BRL",
        grouping_separator: '.',
        decimal_separator: ',',
        min_fraction_digits: 2,
        max_fraction_digits: 2,
        symbol_separator: NO_BREAK_SPACE,
        percent_separator: "",
        date_pattern: "%d/%m/%Y",
        day_month_pattern: "%d/%m",
    },
    LocaleProfile {
        country_code: "CO",
        locale: "es-CO",
        home_currency: "COP",
        grouping_separator: '.',
        decimal_separator: ',',
        min_fraction_digits: 0,
        max_fraction_digits: 2,
        symbol_separator: NO_BREAK_SPACE,
        percent_separator: NO_BREAK_SPACE,
        date_pattern: "%d/%m/%Y",
        day_month_pattern: "%d/%m",
    },
    LocaleProfile {
        country_code: "US",
        locale: "en-US",
        home_currency: "USD",
        grouping_separator: ',',
        decimal_separator: '.',
        min_fraction_digits: 2,
        max_fraction_digits: 2,
        symbol_separator: "",
        percent_separator: "",
        date_pattern: "%m/%d/%Y",
        day_month_pattern: "%m/%d",
    },
];

impl LocaleProfile {
    /// Profile for `country_code`, or the pt-BR profile when there is none.
    pub fn for_country(country_code: &str) -> &'static LocaleProfile {
        PROFILES
            .iter()
            .find(|p| p.country_code == country_code)
            .unwrap_or_else(|| {
                debug!(country = country_code, "No locale profile, using pt-BR");
                &PROFILES[0]
            })
    }

    /// Symbol shown for `currency` in this locale.
    ///
    /// Foreign dollars are qualified so they cannot be mistaken for the
    /// local currency.
    pub fn currency_symbol<'a>(&self, currency: &'a Currency) -> &'a str {
        if currency.code() == self.home_currency {
            currency.symbol()
        } else if currency.code() == "USD" {
            "US$"
        } else if currency.symbol() == "$" {
            currency.code()
        } else {
            currency.symbol()
        }
    }

    /// Renders the absolute value of `value` with grouping and between
    /// `min` and `max` fraction digits.
    fn format_decimal(&self, value: Decimal, min: u32, max: u32) -> String {
        let rounded = value
            .abs()
            .round_dp_with_strategy(max, RoundingStrategy::MidpointAwayFromZero);
        let text = rounded.to_string();
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let mut fraction = fraction.trim_end_matches('0').to_string();
        while fraction.len() < min as usize {
            fraction.push('0');
        }

        let grouped = group_digits(integer, self.grouping_separator);
        if fraction.is_empty() {
            grouped
        } else {
            format!("{grouped}{}{fraction}", self.decimal_separator)
        }
    }

    fn format_signed(&self, value: Decimal, min: u32, max: u32) -> String {
        let body = self.format_decimal(value, min, max);
        if value.is_sign_negative() && !value.is_zero() {
            format!("-{body}")
        } else {
            body
        }
    }
}

fn group_digits(integer: &str, separator: char) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// A date given either as a value or as text to be parsed.
#[derive(Debug, Clone, Copy)]
pub enum DateInput<'a> {
    Date(NaiveDate),
    Text(&'a str),
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(text: &'a str) -> Self {
        DateInput::Text(text)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(text: &'a String) -> Self {
        DateInput::Text(text.as_str())
    }
}

impl DateInput<'_> {
    fn resolve(self, country: &Country) -> Result<NaiveDate> {
        match self {
            DateInput::Date(date) => Ok(date),
            DateInput::Text(text) => parse_date(text, country),
        }
    }
}

/// Formats `amount` in `currency` the way `country` displays money.
pub fn format_currency(amount: Decimal, currency: &Currency, country: &Country) -> String {
    let profile = LocaleProfile::for_country(country.code());
    let symbol = profile.currency_symbol(currency);
    let number = profile.format_decimal(
        amount,
        profile.min_fraction_digits,
        profile.max_fraction_digits,
    );
    let separator = if profile.symbol_separator.is_empty()
        && symbol.ends_with(|c: char| c.is_ascii_alphabetic())
    {
        NO_BREAK_SPACE
    } else {
        profile.symbol_separator
    };
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{separator}{number}")
}

pub fn format_date<'a>(date: impl Into<DateInput<'a>>, country: &Country) -> Result<String> {
    let profile = LocaleProfile::for_country(country.code());
    let date = date.into().resolve(country)?;
    Ok(date.format(profile.date_pattern).to_string())
}

/// Short day/month label, used for chart axes.
pub fn format_day_month<'a>(date: impl Into<DateInput<'a>>, country: &Country) -> Result<String> {
    let profile = LocaleProfile::for_country(country.code());
    let date = date.into().resolve(country)?;
    Ok(date.format(profile.day_month_pattern).to_string())
}

/// Parses ISO-8601 input, then the country's own date pattern.
pub fn parse_date(text: &str, country: &Country) -> Result<NaiveDate> {
    if let Ok(date) = parse_iso_date(text) {
        return Ok(date);
    }
    let profile = LocaleProfile::for_country(country.code());
    NaiveDate::parse_from_str(text.trim(), profile.date_pattern)
        .map_err(|_| FinboardError::ParseError(format!("Invalid date string: {text}")))
}

/// Canonical `YYYY-MM-DD` rendering, independent of locale.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Accepts plain dates, RFC 3339 timestamps and naive `T`-separated
/// timestamps; timestamps are truncated to their calendar date.
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE) {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }
    Err(FinboardError::ParseError(format!("Invalid date string: {text}")))
}

/// Grouped number with up to three fraction digits.
pub fn format_number(value: Decimal, country: &Country) -> String {
    LocaleProfile::for_country(country.code()).format_signed(value, 0, 3)
}

/// `value` is already in percent units: `12.5` renders as `12,5%` in pt-BR.
pub fn format_percentage(value: Decimal, country: &Country) -> String {
    let profile = LocaleProfile::for_country(country.code());
    let number = profile.format_signed(value, 1, 2);
    format!("{number}{}%", profile.percent_separator)
}

pub fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}
