//! Seam between the orchestrator and the remote prediction service

use super::ApiResult;
use crate::{FormData, PredictionResult};
use async_trait::async_trait;
use std::fmt::Debug;

/// Remote reads and the prediction call
///
/// The HTTP client implements this for production; tests substitute
/// in-memory doubles.
#[async_trait]
pub trait PredictionApi: Send + Sync + Debug {
	/// `GET /car-makes`
	async fn get_makes(&self) -> ApiResult<Vec<String>>;

	/// `GET /car-models/{make}`
	async fn get_models(&self, make: &str) -> ApiResult<Vec<String>>;

	/// `GET /locations`
	async fn get_locations(&self) -> ApiResult<Vec<String>>;

	/// `POST /predict` with the full form snapshot as the body
	async fn predict(&self, form: &FormData) -> ApiResult<PredictionResult>;
}
