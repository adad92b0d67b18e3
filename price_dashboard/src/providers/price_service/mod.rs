//! HTTP client for the price service backing the dashboard.

pub mod provider;
pub mod response;

pub use provider::PriceServiceProvider;
