pub mod asset;
pub mod price_point;
pub mod range_summary;
pub mod request_params;
pub mod timeframe;
