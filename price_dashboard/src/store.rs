//! View state of the dashboard and the single function that updates it.
//!
//! Every change goes through [`reduce`]: user gestures and fetch completions
//! are [`Action`]s, and whenever an action needs network I/O the reducer hands
//! back a [`Command`] for the caller to execute. The state itself never
//! performs I/O, which keeps it testable without a runtime.
//!
//! Each fetch is tagged with a generation number. Selecting an asset or
//! refreshing bumps the generation, and completions carrying an older
//! generation are dropped, so a slow response for a previous selection can
//! never overwrite the current one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::{
    chart::{BrushSelection, ChartModel},
    config::DashboardConfig,
    errors::DashboardError,
    models::{
        asset::Asset,
        price_point::PriceSeries,
        range_summary::{ChangeDirection, RangeSummary},
        request_params::PriceSeriesRequest,
    },
    selector::AssetSelector,
    summary::{latest_price, range_change, whole_series_change, SummaryError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing requested yet.
    Idle,
    Loading { generation: u64 },
    Ready,
    /// The last fetch for the current generation failed.
    Unavailable { message: String },
}

#[derive(Debug, Clone)]
pub enum Action {
    /// The user picked an asset in the selector.
    SelectAsset(String),
    /// Re-fetch the selected asset (also used for the initial load).
    Refresh,
    FetchSucceeded { generation: u64, series: PriceSeries },
    FetchFailed { generation: u64, message: String },
    /// The chart's brush moved.
    Brush(BrushSelection),
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch {
        generation: u64,
        request: PriceSeriesRequest,
    },
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    selector: AssetSelector,
    lookback_days: i64,
    generation: u64,
    load: LoadState,
    series: Option<PriceSeries>,
    current_price: Option<Decimal>,
    whole_series_change: Option<Result<Decimal, SummaryError>>,
    range: Option<RangeSummary>,
    rejected_selection: Option<SummaryError>,
}

impl DashboardState {
    pub fn new(selector: AssetSelector, lookback_days: i64) -> Self {
        Self {
            selector,
            lookback_days,
            generation: 0,
            load: LoadState::Idle,
            series: None,
            current_price: None,
            whole_series_change: None,
            range: None,
            rejected_selection: None,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let selector = AssetSelector::new(config.assets.clone())?;
        Ok(Self::new(selector, config.lookback_days))
    }

    pub fn selector(&self) -> &AssetSelector {
        &self.selector
    }

    pub fn selected_asset(&self) -> &Asset {
        self.selector.selected()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading { .. })
    }

    pub fn series(&self) -> Option<&PriceSeries> {
        self.series.as_ref()
    }

    pub fn current_price(&self) -> Option<Decimal> {
        self.current_price
    }

    /// `None` until a series is loaded; `Some(Err(_))` when the change is undefined.
    pub fn whole_series_change(&self) -> Option<Result<Decimal, SummaryError>> {
        self.whole_series_change
    }

    pub fn change_direction(&self) -> Option<ChangeDirection> {
        match self.whole_series_change {
            Some(Ok(change)) => Some(ChangeDirection::of(change)),
            _ => None,
        }
    }

    pub fn range(&self) -> Option<&RangeSummary> {
        self.range.as_ref()
    }

    /// Why the most recent brush selection was ignored, if it was.
    pub fn rejected_selection(&self) -> Option<SummaryError> {
        self.rejected_selection
    }

    pub fn chart(&self) -> Option<ChartModel> {
        self.series.as_ref().map(ChartModel::from_series)
    }

    /// Builds the request first so a bad window leaves the state untouched.
    fn start_fetch(&mut self, today: NaiveDate) -> Result<Command, DashboardError> {
        let request = PriceSeriesRequest::lookback(self.selector.selected(), today, self.lookback_days)?;
        self.generation += 1;
        self.load = LoadState::Loading {
            generation: self.generation,
        };
        debug!(generation = self.generation, symbol = %request.symbol, "fetch scheduled");
        Ok(Command::Fetch {
            generation: self.generation,
            request,
        })
    }

    fn clear_series(&mut self) {
        self.series = None;
        self.current_price = None;
        self.whole_series_change = None;
        self.range = None;
        self.rejected_selection = None;
    }

    fn is_stale(&self, generation: u64) -> bool {
        generation != self.generation || !self.is_loading()
    }
}

/// Applies `action` to `state`. `today` anchors the trailing window of any
/// fetch the action schedules.
pub fn reduce(
    state: &mut DashboardState,
    action: Action,
    today: NaiveDate,
) -> Result<Option<Command>, DashboardError> {
    match action {
        Action::SelectAsset(symbol) => {
            let previous = state.selector.selected().symbol.clone();
            state.selector.select(&symbol)?;
            match state.start_fetch(today) {
                Ok(command) => {
                    // The old series belongs to another asset; never show it under the new title.
                    state.clear_series();
                    Ok(Some(command))
                }
                Err(err) => {
                    state.selector.select(&previous)?;
                    Err(err)
                }
            }
        }

        Action::Refresh => state.start_fetch(today).map(Some),

        Action::FetchSucceeded { generation, series } => {
            if state.is_stale(generation) {
                warn!(generation, current = state.generation, symbol = %series.symbol, "discarding stale price series");
                return Ok(None);
            }
            if series.symbol != state.selector.selected().symbol {
                warn!(
                    got = %series.symbol,
                    expected = %state.selector.selected().symbol,
                    "discarding series for a different asset"
                );
                return Ok(None);
            }

            state.current_price = latest_price(series.points());
            state.whole_series_change = Some(whole_series_change(series.points()));
            state.range = None;
            state.rejected_selection = None;
            state.series = Some(series);
            state.load = LoadState::Ready;
            Ok(None)
        }

        Action::FetchFailed { generation, message } => {
            if state.is_stale(generation) {
                debug!(generation, current = state.generation, "ignoring failure of a stale fetch");
                return Ok(None);
            }
            error!(generation, symbol = %state.selector.selected().symbol, %message, "price series unavailable");
            state.load = LoadState::Unavailable { message };
            Ok(None)
        }

        Action::Brush(selection) => {
            let series = state.series.as_ref().ok_or(DashboardError::NoSeries)?;
            match range_change(series.points(), selection.start_index, selection.end_index) {
                Ok(summary) => {
                    state.range = Some(summary);
                    state.rejected_selection = None;
                    Ok(None)
                }
                Err(err) => {
                    warn!(?selection, %err, "ignoring brush selection");
                    state.rejected_selection = Some(err);
                    Err(err.into())
                }
            }
        }
    }
}
