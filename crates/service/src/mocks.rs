//! In-memory prediction service for tests and demos
//!
//! Tracks every call, can fail each endpoint independently and can delay
//! responses to exercise ordering and timeout paths.

use async_trait::async_trait;
use predictor_types::{ApiError, ApiResult, FormData, PredictionApi, PredictionResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A form that passes every validation rule
pub fn valid_form() -> FormData {
	FormData {
		make: "Maruti".to_string(),
		model: "Swift".to_string(),
		year: Some(2018),
		fuel: "Petrol".to_string(),
		kms_driven: Some(45000),
		transmission: "Manual".to_string(),
		owner: "First Owner".to_string(),
		location: "Mumbai".to_string(),
	}
}

#[derive(Debug, Default)]
struct CallLog {
	makes: AtomicUsize,
	locations: AtomicUsize,
	models: Mutex<Vec<String>>,
	predictions: Mutex<Vec<FormData>>,
}

/// Scriptable [`PredictionApi`]
///
/// Clones share the call log, so a clone handed to the orchestrator can be
/// inspected through the original.
#[derive(Debug, Clone)]
pub struct MockPredictionApi {
	makes: Option<Vec<String>>,
	locations: Option<Vec<String>>,
	models: Option<HashMap<String, Vec<String>>>,
	prediction: Option<PredictionResult>,
	model_delays_ms: HashMap<String, u64>,
	predict_delay_ms: u64,
	calls: Arc<CallLog>,
}

impl Default for MockPredictionApi {
	fn default() -> Self {
		Self::new()
	}
}

impl MockPredictionApi {
	/// Healthy service with a small catalog and a fixed price
	pub fn new() -> Self {
		let models = HashMap::from([
			(
				"Maruti".to_string(),
				vec!["Swift".to_string(), "Baleno".to_string()],
			),
			(
				"Honda".to_string(),
				vec!["City".to_string(), "Amaze".to_string()],
			),
		]);

		Self {
			makes: Some(vec!["Maruti".to_string(), "Honda".to_string()]),
			locations: Some(vec!["Mumbai".to_string(), "Delhi".to_string()]),
			models: Some(models),
			prediction: Some(PredictionResult::success("₹450,000")),
			model_delays_ms: HashMap::new(),
			predict_delay_ms: 0,
			calls: Arc::new(CallLog::default()),
		}
	}

	/// Every endpoint fails
	pub fn unreachable() -> Self {
		Self::new()
			.failing_makes()
			.failing_locations()
			.failing_models()
			.failing_predictions()
	}

	pub fn failing_makes(mut self) -> Self {
		self.makes = None;
		self
	}

	pub fn failing_locations(mut self) -> Self {
		self.locations = None;
		self
	}

	pub fn failing_models(mut self) -> Self {
		self.models = None;
		self
	}

	pub fn failing_predictions(mut self) -> Self {
		self.prediction = None;
		self
	}

	pub fn with_prediction(mut self, result: PredictionResult) -> Self {
		self.prediction = Some(result);
		self
	}

	pub fn with_models(mut self, make: &str, models: &[&str]) -> Self {
		self.models
			.get_or_insert_with(HashMap::new)
			.insert(make.to_string(), models.iter().map(|m| m.to_string()).collect());
		self
	}

	/// Delay the model list of one make
	pub fn with_model_delay(mut self, make: &str, delay_ms: u64) -> Self {
		self.model_delays_ms.insert(make.to_string(), delay_ms);
		self
	}

	pub fn with_predict_delay(mut self, delay_ms: u64) -> Self {
		self.predict_delay_ms = delay_ms;
		self
	}

	pub fn makes_calls(&self) -> usize {
		self.calls.makes.load(Ordering::SeqCst)
	}

	pub fn locations_calls(&self) -> usize {
		self.calls.locations.load(Ordering::SeqCst)
	}

	/// Makes whose models were requested, in request order
	pub fn models_requests(&self) -> Vec<String> {
		self.calls
			.models
			.lock()
			.map(|log| log.clone())
			.unwrap_or_default()
	}

	pub fn predict_calls(&self) -> usize {
		self.predicted_forms().len()
	}

	/// Payloads sent to the prediction endpoint, in order
	pub fn predicted_forms(&self) -> Vec<FormData> {
		self.calls
			.predictions
			.lock()
			.map(|log| log.clone())
			.unwrap_or_default()
	}

	fn unavailable(endpoint: &str) -> ApiError {
		ApiError::HttpStatusError {
			status_code: 503,
			reason: format!("mock {} unavailable", endpoint),
		}
	}
}

#[async_trait]
impl PredictionApi for MockPredictionApi {
	async fn get_makes(&self) -> ApiResult<Vec<String>> {
		self.calls.makes.fetch_add(1, Ordering::SeqCst);
		self.makes
			.clone()
			.ok_or_else(|| Self::unavailable("car-makes"))
	}

	async fn get_models(&self, make: &str) -> ApiResult<Vec<String>> {
		if let Ok(mut log) = self.calls.models.lock() {
			log.push(make.to_string());
		}

		if let Some(delay_ms) = self.model_delays_ms.get(make) {
			tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
		}

		let models = self
			.models
			.as_ref()
			.ok_or_else(|| Self::unavailable("car-models"))?;
		Ok(models.get(make).cloned().unwrap_or_default())
	}

	async fn get_locations(&self) -> ApiResult<Vec<String>> {
		self.calls.locations.fetch_add(1, Ordering::SeqCst);
		self.locations
			.clone()
			.ok_or_else(|| Self::unavailable("locations"))
	}

	async fn predict(&self, form: &FormData) -> ApiResult<PredictionResult> {
		if let Ok(mut log) = self.calls.predictions.lock() {
			log.push(form.clone());
		}

		if self.predict_delay_ms > 0 {
			tokio::time::sleep(Duration::from_millis(self.predict_delay_ms)).await;
		}

		self.prediction
			.clone()
			.ok_or_else(|| Self::unavailable("predict"))
	}
}
