//! Live HTTP prediction service for integration tests
//!
//! Serves `/car-makes`, `/car-models/{make}`, `/locations` and `/predict`
//! on an ephemeral port and records every request it receives.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use resale_predictor::serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How the `/predict` endpoint answers
#[derive(Debug, Clone)]
pub enum ServerBehavior {
	/// 200 with a price, confidence and market analysis
	Healthy,
	/// 500 with no usable body
	PredictFails,
	/// 200 with `{"error": ..., "predicted_price": null}`
	PredictReportsError(String),
	/// Sleep before answering
	PredictDelayed(Duration),
}

#[derive(Debug, Default)]
pub struct RequestLog {
	pub models: Mutex<Vec<String>>,
	pub predictions: Mutex<Vec<Value>>,
}

#[derive(Clone)]
struct ServerState {
	behavior: ServerBehavior,
	models: Arc<HashMap<String, Vec<String>>>,
	log: Arc<RequestLog>,
}

pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
	pub log: Arc<RequestLog>,
}

impl TestServer {
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with(ServerBehavior::Healthy).await
	}

	pub async fn spawn_with(behavior: ServerBehavior) -> Result<Self, Box<dyn std::error::Error>> {
		let models = HashMap::from([
			(
				"Maruti".to_string(),
				vec!["Swift".to_string(), "Baleno".to_string(), "Dzire".to_string()],
			),
			(
				"Land Rover".to_string(),
				vec!["Defender".to_string(), "Discovery".to_string()],
			),
		]);
		let log = Arc::new(RequestLog::default());
		let state = ServerState {
			behavior,
			models: Arc::new(models),
			log: Arc::clone(&log),
		};

		let app = Router::new()
			.route("/car-makes", get(car_makes))
			.route("/car-models/{make}", get(car_models))
			.route("/locations", get(locations))
			.route("/predict", post(predict))
			.with_state(state);

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			// Ignore serve errors when test aborts the task
			let _ = axum::serve(listener, app).await;
		});

		Ok(Self {
			base_url,
			handle,
			log,
		})
	}

	pub fn model_requests(&self) -> Vec<String> {
		self.log.models.lock().unwrap().clone()
	}

	pub fn predictions(&self) -> Vec<Value> {
		self.log.predictions.lock().unwrap().clone()
	}
}

impl Drop for TestServer {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

async fn car_makes() -> Json<Value> {
	Json(json!({ "makes": ["Maruti", "Land Rover", "Tata"] }))
}

async fn locations() -> Json<Value> {
	Json(json!({ "locations": ["Mumbai", "Pune"] }))
}

async fn car_models(State(state): State<ServerState>, Path(make): Path<String>) -> Json<Value> {
	state.log.models.lock().unwrap().push(make.clone());
	let models = state.models.get(&make).cloned().unwrap_or_default();
	Json(json!({ "models": models }))
}

async fn predict(
	State(state): State<ServerState>,
	Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
	state.log.predictions.lock().unwrap().push(body);

	match state.behavior {
		ServerBehavior::Healthy => (
			StatusCode::OK,
			Json(json!({
				"predicted_price": "₹450,000",
				"confidence": "High",
				"market_analysis": ["Popular model in Mumbai", "Low mileage for its age"]
			})),
		),
		ServerBehavior::PredictFails => (
			StatusCode::INTERNAL_SERVER_ERROR,
			Json(json!({ "detail": "model crashed" })),
		),
		ServerBehavior::PredictReportsError(message) => (
			StatusCode::OK,
			Json(json!({ "error": message, "predicted_price": null })),
		),
		ServerBehavior::PredictDelayed(delay) => {
			tokio::time::sleep(delay).await;
			(StatusCode::OK, Json(json!({ "predicted_price": "₹1" })))
		},
	}
}
