//! Predictor Adapters
//!
//! Transport implementations of the prediction service contract.

pub mod http_client;

pub use http_client::{HttpClientConfig, HttpPredictionClient};
pub use predictor_types::{ApiError, ApiResult, PredictionApi};
