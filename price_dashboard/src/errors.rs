use thiserror::Error;

use crate::{
    config::ConfigError,
    providers::{ProviderError, ProviderInitError},
    selector::SelectionError,
    summary::SummaryError,
};

/// The unified error type for the `price_dashboard` crate.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Fetching or decoding a price series failed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider could not be constructed.
    #[error("Provider setup error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// The requested asset is not selectable.
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// A summary could not be computed for the current series or brush.
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A brush arrived while no series is displayed.
    #[error("no price series is loaded")]
    NoSeries,
}
