//! Derived figures for a price series: the whole-series change shown next to
//! the current price, and the change over a brush-selected sub-range.
//!
//! Both calculators return a [`SummaryError`] instead of a number whenever the
//! result would be meaningless: an empty series, a zero reference price, or a
//! selection index that falls outside the series.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::{price_point::PricePoint, range_summary::RangeSummary};

/// Decimal places every displayed change is rounded to.
pub const CHANGE_DP: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("the price series is empty")]
    EmptySeries,

    #[error("the reference price is zero; percentage change is undefined")]
    ZeroReferencePrice,

    #[error("selection index {index} is out of bounds for a series of {len} points")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("price change overflowed decimal precision")]
    Overflow,
}

fn round_change(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(CHANGE_DP, RoundingStrategy::MidpointAwayFromZero);
    // -0.004 rounds to a negative zero, which would print as "-0.00".
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// `(to - from) / from * 100`, unrounded.
fn percent_change(from: Decimal, to: Decimal) -> Result<Decimal, SummaryError> {
    if from.is_zero() {
        return Err(SummaryError::ZeroReferencePrice);
    }
    to.checked_sub(from)
        .and_then(|delta| delta.checked_div(from))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(SummaryError::Overflow)
}

/// Percentage change from the first to the last point, rounded to 2 decimals.
pub fn whole_series_change(points: &[PricePoint]) -> Result<Decimal, SummaryError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(SummaryError::EmptySeries),
    };
    percent_change(first.price, last.price).map(round_change)
}

/// Change between the points at `start` and `end`.
///
/// The change is measured from `start` to `end`, so a selection dragged
/// right-to-left simply reports the opposite sign.
pub fn range_change(points: &[PricePoint], start: usize, end: usize) -> Result<RangeSummary, SummaryError> {
    if points.is_empty() {
        return Err(SummaryError::EmptySeries);
    }
    let point_at = |index: usize| {
        points.get(index).ok_or(SummaryError::IndexOutOfBounds {
            index,
            len: points.len(),
        })
    };
    let start_price = point_at(start)?.price;
    let end_price = point_at(end)?.price;

    let percentage = percent_change(start_price, end_price)?;
    let absolute = end_price.checked_sub(start_price).ok_or(SummaryError::Overflow)?;

    Ok(RangeSummary {
        start_price,
        end_price,
        absolute_change: round_change(absolute),
        percentage_change: round_change(percentage),
    })
}

/// Last close of the series, i.e. the "current price".
pub fn latest_price(points: &[PricePoint]) -> Option<Decimal> {
    points.last().map(|p| p.price)
}

/// Renders a change or price with exactly two decimals (`-1.00`, `10.00`).
pub fn format_change(value: Decimal) -> String {
    format!("{:.2}", round_change(value))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;

    fn series(prices: &[&str]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| {
                PricePoint::new(
                    start + chrono::Duration::days(i as i64),
                    p.parse().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn whole_series_example() {
        let seq = series(&["100.00", "110.00", "99.00"]);
        let change = whole_series_change(&seq).unwrap();
        assert_eq!(format_change(change), "-1.00");
    }

    #[test]
    fn range_example() {
        let seq = series(&["100.00", "110.00", "99.00"]);
        let summary = range_change(&seq, 0, 1).unwrap();
        assert_eq!(format_change(summary.absolute_change), "10.00");
        assert_eq!(format_change(summary.percentage_change), "10.00");
        assert_eq!(summary.start_price, "100.00".parse::<Decimal>().unwrap());
        assert_eq!(summary.end_price, "110.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn range_is_measured_from_start_to_end() {
        let seq = series(&["100.00", "110.00", "99.00"]);
        let summary = range_change(&seq, 1, 0).unwrap();
        assert_eq!(format_change(summary.absolute_change), "-10.00");
        assert_eq!(format_change(summary.percentage_change), "-9.09");
    }

    #[test]
    fn single_point_range_is_flat() {
        let seq = series(&["42.10"]);
        let summary = range_change(&seq, 0, 0).unwrap();
        assert!(summary.absolute_change.is_zero());
        assert!(summary.percentage_change.is_zero());
        assert!(whole_series_change(&seq).unwrap().is_zero());
    }

    #[test]
    fn empty_series_is_undefined() {
        assert_eq!(whole_series_change(&[]), Err(SummaryError::EmptySeries));
        assert_eq!(range_change(&[], 0, 0), Err(SummaryError::EmptySeries));
        assert_eq!(latest_price(&[]), None);
    }

    #[test]
    fn zero_reference_is_undefined() {
        let seq = series(&["0", "5.00"]);
        assert_eq!(whole_series_change(&seq), Err(SummaryError::ZeroReferencePrice));
        assert_eq!(range_change(&seq, 0, 1), Err(SummaryError::ZeroReferencePrice));
        // A zero end price is fine: the reference is the start.
        assert_eq!(
            format_change(range_change(&seq, 1, 0).unwrap().percentage_change),
            "-100.00"
        );
    }

    #[test]
    fn out_of_bounds_is_rejected_not_zeroed() {
        let seq = series(&["100.00", "110.00", "99.00"]);
        assert_eq!(
            range_change(&seq, 0, 3),
            Err(SummaryError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            range_change(&seq, 7, 1),
            Err(SummaryError::IndexOutOfBounds { index: 7, len: 3 })
        );
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 100 -> 100.005 is +0.005%, which rounds up to 0.01.
        let seq = series(&["100", "100.005"]);
        assert_eq!(format_change(whole_series_change(&seq).unwrap()), "0.01");
        let seq = series(&["100", "99.995"]);
        assert_eq!(format_change(whole_series_change(&seq).unwrap()), "-0.01");
    }

    #[test]
    fn tiny_losses_do_not_print_negative_zero() {
        let seq = series(&["100", "99.999"]);
        assert_eq!(format_change(whole_series_change(&seq).unwrap()), "0.00");
    }

    #[test]
    fn latest_price_is_last_close() {
        let seq = series(&["1.50", "2.25"]);
        assert_eq!(format_change(latest_price(&seq).unwrap()), "2.25");
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    proptest! {
        #[test]
        fn whole_series_matches_formula(first in cents(), middle in cents(), last in cents()) {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let seq = vec![
                PricePoint::new(date, first),
                PricePoint::new(date.succ_opt().unwrap(), middle),
                PricePoint::new(date + chrono::Duration::days(2), last),
            ];
            let expected = ((last - first) / first * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            prop_assert_eq!(whole_series_change(&seq).unwrap(), expected);
        }

        #[test]
        fn range_absolute_is_exact_difference(prices in proptest::collection::vec(cents(), 1..20), i in 0usize..20, j in 0usize..20) {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let seq: Vec<_> = prices
                .iter()
                .enumerate()
                .map(|(k, p)| PricePoint::new(date + chrono::Duration::days(k as i64), *p))
                .collect();
            match range_change(&seq, i, j) {
                Ok(summary) => {
                    prop_assert!(i < seq.len() && j < seq.len());
                    prop_assert_eq!(summary.absolute_change, seq[j].price - seq[i].price);
                }
                Err(SummaryError::IndexOutOfBounds { index, len }) => {
                    prop_assert!(index >= len);
                    prop_assert!(i >= seq.len() || j >= seq.len());
                }
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
        }
    }
}
