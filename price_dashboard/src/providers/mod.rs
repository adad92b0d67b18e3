//! Price-series providers.
//!
//! [`PriceProvider`] is the seam between the dashboard and whatever service
//! supplies closing prices. The dashboard only ever talks to the trait, so the
//! HTTP implementation in [`price_service`] can be swapped for an in-memory
//! one in tests.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use price_dashboard::models::{
//!     price_point::PriceSeries, request_params::PriceSeriesRequest,
//! };
//! use price_dashboard::providers::{PriceProvider, ProviderError};
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl PriceProvider for EmptyProvider {
//!     async fn fetch_series(
//!         &self,
//!         request: PriceSeriesRequest,
//!     ) -> Result<PriceSeries, ProviderError> {
//!         Ok(PriceSeries::new(request.symbol, request.timeframe, vec![]))
//!     }
//! }
//! ```

pub mod errors;
pub mod price_service;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{price_point::PriceSeries, request_params::PriceSeriesRequest};

pub use errors::{ProviderError, ProviderInitError};

/// Fetches a closing-price series for one symbol and date window.
///
/// One call performs one request against the backing service. Implementations
/// return the points in ascending date order.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_series(&self, request: PriceSeriesRequest) -> Result<PriceSeries, ProviderError>;
}

#[async_trait]
impl<P: PriceProvider + ?Sized> PriceProvider for Arc<P> {
    async fn fetch_series(&self, request: PriceSeriesRequest) -> Result<PriceSeries, ProviderError> {
        (**self).fetch_series(request).await
    }
}

#[async_trait]
impl<P: PriceProvider + ?Sized> PriceProvider for Box<P> {
    async fn fetch_series(&self, request: PriceSeriesRequest) -> Result<PriceSeries, ProviderError> {
        (**self).fetch_series(request).await
    }
}
