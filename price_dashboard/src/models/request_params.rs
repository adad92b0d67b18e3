use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

use crate::{
    models::{asset::Asset, timeframe::TimeFrame},
    providers::ProviderError,
};

/// Number of calendar days covered by the dashboard's trailing window.
pub const TRAILING_YEAR_DAYS: i64 = 365;

/// Longest window the dashboard will ask for (a century of closes).
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

/// Parameters for requesting a closing-price series from the price service.
///
/// Serializes directly into the JSON body the service expects:
/// `{"symbol", "start_date", "end_date", "timeframe"}` with ISO dates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PriceSeriesRequest {
    /// Symbol to request (e.g., `"AAPL"`).
    pub symbol: String,

    /// First calendar day of the window (inclusive).
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,

    /// Last calendar day of the window (inclusive).
    #[serde(with = "iso_date")]
    pub end_date: NaiveDate,

    /// Interval between points; the dashboard always asks for `day`.
    pub timeframe: TimeFrame,
}

impl PriceSeriesRequest {
    /// A window of `days` calendar days ending on `today`.
    ///
    /// `days` must lie in `1..=MAX_LOOKBACK_DAYS`.
    pub fn lookback(asset: &Asset, today: NaiveDate, days: i64) -> Result<Self, ProviderError> {
        if !(1..=MAX_LOOKBACK_DAYS).contains(&days) {
            return Err(ProviderError::Validation(format!(
                "lookback of {days} days is outside 1..={MAX_LOOKBACK_DAYS}"
            )));
        }
        let start_date = TimeDelta::try_days(days)
            .and_then(|window| today.checked_sub_signed(window))
            .ok_or_else(|| {
                ProviderError::Validation(format!("{days} days before {today} is not a representable date"))
            })?;

        Ok(Self {
            symbol: asset.symbol.clone(),
            start_date,
            end_date: today,
            timeframe: TimeFrame::day(),
        })
    }

    /// The 365-day window ending on `today`.
    pub fn trailing_year(asset: &Asset, today: NaiveDate) -> Result<Self, ProviderError> {
        Self::lookback(asset, today, TRAILING_YEAR_DAYS)
    }

    /// Checks the request before it goes on the wire.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.symbol.trim().is_empty() {
            return Err(ProviderError::Validation("symbol must not be empty".into()));
        }
        if self.start_date > self.end_date {
            return Err(ProviderError::Validation(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Asset {
        Asset::stock("AAPL", "Apple Inc.")
    }

    #[test]
    fn trailing_year_spans_365_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let req = PriceSeriesRequest::trailing_year(&apple(), today).unwrap();
        assert_eq!(req.end_date, today);
        assert_eq!(req.start_date, NaiveDate::from_ymd_opt(2023, 3, 2).unwrap());
        assert_eq!((req.end_date - req.start_date).num_days(), 365);
    }

    #[test]
    fn body_matches_service_contract() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 19).unwrap();
        let req = PriceSeriesRequest::trailing_year(&apple(), today).unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "symbol": "AAPL",
                "start_date": "2023-10-20",
                "end_date": "2024-10-19",
                "timeframe": "day",
            })
        );
    }

    #[test]
    fn validation_rejects_inverted_window_and_blank_symbol() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut req = PriceSeriesRequest::trailing_year(&apple(), today).unwrap();
        assert!(req.validate().is_ok());

        req.start_date = today + TimeDelta::days(1);
        assert!(matches!(req.validate(), Err(ProviderError::Validation(_))));

        let mut req = PriceSeriesRequest::trailing_year(&apple(), today).unwrap();
        req.symbol = "  ".into();
        assert!(matches!(req.validate(), Err(ProviderError::Validation(_))));
    }

    #[test]
    fn lookback_out_of_range_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 19).unwrap();
        for days in [0, -5, MAX_LOOKBACK_DAYS + 1, 1_000_000_000, i64::MAX] {
            let err = PriceSeriesRequest::lookback(&apple(), today, days).unwrap_err();
            assert!(matches!(err, ProviderError::Validation(_)), "{days}: {err}");
        }

        // Near the start of chrono's calendar even a bounded window does not fit.
        let err = PriceSeriesRequest::lookback(&apple(), NaiveDate::MIN, 1).unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));

        let longest = PriceSeriesRequest::lookback(&apple(), today, MAX_LOOKBACK_DAYS).unwrap();
        assert_eq!((longest.end_date - longest.start_date).num_days(), MAX_LOOKBACK_DAYS);
    }
}
