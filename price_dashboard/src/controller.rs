//! Async driver for [`DashboardState`].
//!
//! The controller executes the [`Command`]s the reducer emits. Each fetch runs
//! on its own tokio task and reports back over a channel tagged with the
//! generation that scheduled it. Starting a new fetch aborts the previous
//! task; an aborted task that already finished is still filtered out by the
//! reducer's generation check.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    chart::BrushSelection,
    errors::DashboardError,
    models::price_point::PriceSeries,
    providers::{PriceProvider, ProviderError},
    store::{reduce, Action, Command, DashboardState},
};

/// Completion of one spawned fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<PriceSeries, ProviderError>,
}

pub struct DashboardController<P> {
    state: DashboardState,
    provider: Arc<P>,
    outcomes_tx: UnboundedSender<FetchOutcome>,
    outcomes_rx: UnboundedReceiver<FetchOutcome>,
    in_flight: Option<JoinHandle<()>>,
    clock: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<P: PriceProvider + 'static> DashboardController<P> {
    pub fn new(state: DashboardState, provider: Arc<P>) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            state,
            provider,
            outcomes_tx,
            outcomes_rx,
            in_flight: None,
            clock: local_today,
        }
    }

    /// Replaces the source of "today" used to anchor fetch windows.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Runs `action` through the reducer and executes whatever it asks for.
    pub fn dispatch(&mut self, action: Action) -> Result<(), DashboardError> {
        let today = (self.clock)();
        if let Some(command) = reduce(&mut self.state, action, today)? {
            self.execute(command);
        }
        Ok(())
    }

    pub fn select_asset(&mut self, symbol: &str) -> Result<(), DashboardError> {
        self.dispatch(Action::SelectAsset(symbol.to_string()))
    }

    pub fn refresh(&mut self) -> Result<(), DashboardError> {
        self.dispatch(Action::Refresh)
    }

    pub fn brush(&mut self, start_index: usize, end_index: usize) -> Result<(), DashboardError> {
        self.dispatch(Action::Brush(BrushSelection::new(start_index, end_index)))
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Fetch { generation, request } => {
                if let Some(previous) = self.in_flight.take() {
                    if !previous.is_finished() {
                        debug!(generation, "aborting superseded fetch");
                    }
                    previous.abort();
                }

                let provider = Arc::clone(&self.provider);
                let tx = self.outcomes_tx.clone();
                self.in_flight = Some(tokio::spawn(async move {
                    let result = provider.fetch_series(request).await;
                    // The receiver lives as long as the controller.
                    let _ = tx.send(FetchOutcome { generation, result });
                }));
            }
        }
    }

    /// Waits for one fetch to complete and applies it.
    ///
    /// Returns the generation of the outcome, which may be stale and
    /// therefore ignored by the reducer.
    pub async fn next_outcome(&mut self) -> Result<Option<u64>, DashboardError> {
        let Some(outcome) = self.outcomes_rx.recv().await else {
            return Ok(None);
        };
        let generation = outcome.generation;
        let action = match outcome.result {
            Ok(series) => {
                debug!(generation, symbol = %series.symbol, points = series.len(), "price series received");
                Action::FetchSucceeded { generation, series }
            }
            Err(err) => Action::FetchFailed {
                generation,
                message: err.to_string(),
            },
        };
        self.dispatch(action)?;
        Ok(Some(generation))
    }

    /// Processes completions until the current fetch has been applied.
    pub async fn settle(&mut self) -> Result<(), DashboardError> {
        while self.state.is_loading() {
            if self.next_outcome().await?.is_none() {
                break;
            }
        }
        Ok(())
    }
}

impl<P> Drop for DashboardController<P> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
