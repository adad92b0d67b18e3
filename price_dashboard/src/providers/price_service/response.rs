//! Wire types for the price service's `/stocks/` response and their
//! normalization into [`PricePoint`]s.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{models::price_point::PricePoint, providers::ProviderError};

/// A close as sent by the service: either a JSON number or a decimal string.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawClose {
    Number(serde_json::Number),
    Text(String),
}

impl RawClose {
    fn to_decimal(&self) -> Result<Decimal, ProviderError> {
        let text = match self {
            RawClose::Number(n) => n.to_string(),
            RawClose::Text(s) => s.trim().to_string(),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|e| ProviderError::Parse(format!("invalid close '{text}': {e}")))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServiceBar {
    pub timestamp: String,
    pub close: RawClose,
}

#[derive(Deserialize, Debug)]
pub struct ServiceResponse {
    pub data: Vec<ServiceBar>,
}

impl ServiceBar {
    /// Maps `close` to the price and keeps the calendar date of `timestamp`.
    pub fn to_point(&self) -> Result<PricePoint, ProviderError> {
        let date = parse_timestamp(&self.timestamp)?;
        let price = self.close.to_decimal()?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ProviderError::Parse(format!(
                "negative close {price} at {}",
                self.timestamp
            )));
        }
        Ok(PricePoint::new(date, price))
    }
}

impl ServiceResponse {
    /// Converts every record, failing on the first malformed one.
    pub fn into_points(self) -> Result<Vec<PricePoint>, ProviderError> {
        self.data.iter().map(ServiceBar::to_point).collect()
    }
}

/// Accepts `2024-01-02`, `2024-01-02T00:00:00Z` (any offset) and the naive
/// `2024-01-02T00:00:00` / `2024-01-02 00:00:00` forms.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDate, ProviderError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.date());
        }
    }
    Err(ProviderError::Parse(format!("unrecognized timestamp '{raw}'")))
}
