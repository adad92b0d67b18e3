//! What the dashboard hands to a chart renderer, and what it gets back.
//!
//! Drawing is left to whatever charting library hosts the view. This module
//! only computes the y-axis domain and x-axis tick labels for the displayed
//! points, and defines the brush event a renderer emits when the user drags a
//! selection.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::price_point::{PricePoint, PriceSeries};

/// `[min(price) × 0.9, max(price) × 1.1]` over the displayed points.
///
/// `None` for an empty series, or when the padded maximum does not fit in a
/// `Decimal`.
pub fn y_domain(points: &[PricePoint]) -> Option<(Decimal, Decimal)> {
    let min = points.iter().map(|p| p.price).min()?;
    let max = points.iter().map(|p| p.price).max()?;
    let low = min.checked_mul(Decimal::new(9, 1))?;
    let high = max.checked_mul(Decimal::new(11, 1))?;
    Some((low, high))
}

/// x-axis label in `day/month/year` form, without zero padding (`5/3/2024`).
pub fn tick_label(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Two indices into the displayed series, as reported by the chart's brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrushSelection {
    pub start_index: usize,
    pub end_index: usize,
}

impl BrushSelection {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    /// The selection spanning the entire series, which is where a brush starts.
    pub fn full(series_len: usize) -> Option<Self> {
        series_len.checked_sub(1).map(|last| Self::new(0, last))
    }
}

/// Everything a renderer needs to draw one series.
#[derive(Debug, Clone, Serialize)]
pub struct ChartModel {
    pub symbol: String,
    pub points: Vec<PricePoint>,
    pub tick_labels: Vec<String>,
    pub y_domain: Option<(Decimal, Decimal)>,
}

impl ChartModel {
    pub fn from_series(series: &PriceSeries) -> Self {
        let points = series.points().to_vec();
        Self {
            symbol: series.symbol.clone(),
            tick_labels: points.iter().map(|p| tick_label(p.date)).collect(),
            y_domain: y_domain(&points),
            points,
        }
    }
}
