use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::{
    config::DashboardConfig,
    models::{price_point::PriceSeries, request_params::PriceSeriesRequest},
    providers::{
        price_service::response::ServiceResponse, PriceProvider, ProviderError, ProviderInitError,
    },
};

const STOCKS_PATH: &str = "stocks/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`PriceProvider`] backed by the price service's `POST /stocks/` endpoint.
pub struct PriceServiceProvider {
    client: Client,
    endpoint: Url,
}

impl PriceServiceProvider {
    /// Creates a provider for the service rooted at `base_url`
    /// (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: &str) -> Result<Self, ProviderInitError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ProviderInitError> {
        let endpoint = stocks_endpoint(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, ProviderInitError> {
        Self::with_timeout(&config.base_url, config.request_timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn stocks_endpoint(base_url: &str) -> Result<Url, ProviderInitError> {
    let invalid = || ProviderInitError::InvalidBaseUrl(base_url.to_string());

    // A trailing slash makes `join` append instead of replacing the last segment.
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let url = Url::parse(&base).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid());
    }
    url.join(STOCKS_PATH).map_err(|_| invalid())
}

#[async_trait]
impl PriceProvider for PriceServiceProvider {
    async fn fetch_series(&self, request: PriceSeriesRequest) -> Result<PriceSeries, ProviderError> {
        request.validate()?;
        debug!(
            symbol = %request.symbol,
            start = %request.start_date,
            end = %request.end_date,
            url = %self.endpoint,
            "requesting price series"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let parsed: ServiceResponse = serde_json::from_slice(&body)
            .map_err(|e| ProviderError::Parse(format!("unexpected response body: {e}")))?;
        let points = parsed.into_points()?;

        let series = PriceSeries::new(request.symbol, request.timeframe, points);
        info!(symbol = %series.symbol, points = series.len(), "fetched price series");
        Ok(series)
    }
}
