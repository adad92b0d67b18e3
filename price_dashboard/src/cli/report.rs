use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    chart::{tick_label, y_domain},
    models::{
        asset::Asset,
        range_summary::{ChangeDirection, RangeSummary},
    },
    store::{DashboardState, LoadState},
    summary::format_change,
};

/// Printable snapshot of the dashboard, for the terminal or as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub asset: Asset,
    pub status: LoadState,
    pub current_price: Option<Decimal>,
    pub change_percent: Option<Decimal>,
    /// Set when a series is loaded but its change is undefined.
    pub change_error: Option<String>,
    pub direction: Option<ChangeDirection>,
    pub points: usize,
    pub first_label: Option<String>,
    pub last_label: Option<String>,
    pub y_domain: Option<(Decimal, Decimal)>,
    pub range: Option<RangeSummary>,
    pub rejected_selection: Option<String>,
}

impl DashboardReport {
    pub fn from_state(state: &DashboardState) -> Self {
        let series = state.series();
        let points = series.map(|s| s.points()).unwrap_or_default();
        let (change_percent, change_error) = match state.whole_series_change() {
            Some(Ok(change)) => (Some(change), None),
            Some(Err(err)) => (None, Some(err.to_string())),
            None => (None, None),
        };

        Self {
            asset: state.selected_asset().clone(),
            status: state.load_state().clone(),
            current_price: state.current_price(),
            change_percent,
            change_error,
            direction: state.change_direction(),
            points: points.len(),
            first_label: points.first().map(|p| tick_label(p.date)),
            last_label: points.last().map(|p| tick_label(p.date)),
            y_domain: y_domain(points),
            range: state.range().copied(),
            rejected_selection: state.rejected_selection().map(|e| e.to_string()),
        }
    }
}

fn direction_marker(direction: ChangeDirection) -> &'static str {
    match direction {
        ChangeDirection::Up => "▲",
        ChangeDirection::Down => "▼",
        ChangeDirection::Flat => "=",
    }
}

impl fmt::Display for DashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.asset, self.asset.kind)?;
        match &self.status {
            LoadState::Idle => writeln!(f, "  no data requested")?,
            LoadState::Loading { .. } => writeln!(f, "  loading...")?,
            LoadState::Unavailable { message } => writeln!(f, "  price data unavailable: {message}")?,
            LoadState::Ready => {}
        }

        if let Some(price) = self.current_price {
            writeln!(f, "  current price: {}", format_change(price))?;
        }
        match (self.change_percent, self.direction, &self.change_error) {
            (Some(change), Some(direction), _) => {
                writeln!(f, "  change: {}% {}", format_change(change), direction_marker(direction))?
            }
            (_, _, Some(err)) => writeln!(f, "  change: n/a ({err})")?,
            _ => {}
        }
        if let (Some(first), Some(last)) = (&self.first_label, &self.last_label) {
            writeln!(f, "  points: {} ({first} .. {last})", self.points)?;
        }
        if let Some((low, high)) = self.y_domain {
            writeln!(f, "  y domain: {} .. {}", format_change(low), format_change(high))?;
        }
        if let Some(range) = &self.range {
            writeln!(
                f,
                "  selection: {} -> {}, change {} ({}%)",
                format_change(range.start_price),
                format_change(range.end_price),
                format_change(range.absolute_change),
                format_change(range.percentage_change),
            )?;
        }
        if let Some(rejected) = &self.rejected_selection {
            writeln!(f, "  selection rejected: {rejected}")?;
        }
        Ok(())
    }
}
