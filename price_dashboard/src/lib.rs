//! Client-side core of a price dashboard.
//!
//! The crate covers everything between an asset picker and a chart widget:
//! the static asset list ([`selector`]), fetching a trailing year of daily
//! closes from the price service ([`providers`]), the whole-series and
//! brush-range changes ([`summary`]), the data a chart renderer consumes
//! ([`chart`]), and the view state with its update function ([`store`]),
//! driven asynchronously by [`controller`].

#[cfg(feature = "cli")]
pub mod cli;
pub mod chart;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod providers;
pub mod selector;
pub mod store;
pub mod summary;

pub use errors::DashboardError;
