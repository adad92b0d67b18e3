//! Canonical in-memory representation of a daily closing price.
//!
//! [`PricePoint`] is the output of every [`PriceProvider`](crate::providers::PriceProvider)
//! implementation, whatever the wire format of the remote service looks like.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::timeframe::TimeFrame;

/// A single (date, closing price) observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricePoint {
    /// Calendar date of the close.
    pub date: NaiveDate,

    /// Closing price. Never negative.
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// A fetched, date-ordered series of closes for one symbol.
///
/// The points are shared behind an `Arc` so the series can be handed to the
/// chart and kept in the dashboard state without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// Interval between consecutive points.
    pub timeframe: TimeFrame,
    points: Arc<[PricePoint]>,
}

impl PriceSeries {
    /// Builds a series, sorting the points ascending by date.
    ///
    /// The sort is stable so duplicate dates keep the order the service sent them in.
    pub fn new(symbol: impl Into<String>, timeframe: TimeFrame, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            symbol: symbol.into(),
            timeframe,
            points: points.into(),
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}
