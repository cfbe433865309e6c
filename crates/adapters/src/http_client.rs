//! HTTP adapter for the prediction service
//!
//! Implements the four-endpoint JSON contract on top of a single pooled
//! `reqwest` client.

use async_trait::async_trait;
use predictor_types::{
	ApiError, ApiResult, FormData, LocationsResponse, MakesResponse, ModelsResponse,
	PredictionApi, PredictionResult,
};
use reqwest::{
	header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT},
	Client, Response,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Connection settings for [`HttpPredictionClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
	pub base_url: String,
	/// Applied to each option-list read
	pub request_timeout: Duration,
	/// Applied to the prediction call
	pub predict_timeout: Duration,
	pub user_agent: String,
}

impl HttpClientConfig {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			request_timeout: Duration::from_millis(5000),
			predict_timeout: Duration::from_millis(15000),
			user_agent: "resale-predictor/1.0".to_string(),
		}
	}

	pub fn with_timeouts(mut self, request_timeout: Duration, predict_timeout: Duration) -> Self {
		self.request_timeout = request_timeout;
		self.predict_timeout = predict_timeout;
		self
	}
}

/// reqwest-backed [`PredictionApi`]
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
	client: Client,
	base_url: Url,
	config: HttpClientConfig,
}

impl HttpPredictionClient {
	pub fn new(config: HttpClientConfig) -> ApiResult<Self> {
		let mut base_url = Url::parse(&config.base_url).map_err(|e| ApiError::ConfigError {
			reason: format!("Invalid base URL '{}': {}", config.base_url, e),
		})?;

		// Ensure the base URL is treated as a directory so joins keep any path prefix
		if !base_url.path().ends_with('/') {
			base_url.set_path(&format!("{}/", base_url.path()));
		}

		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.insert(
			USER_AGENT,
			HeaderValue::from_str(&config.user_agent).map_err(|_| ApiError::ConfigError {
				reason: format!("Invalid user agent '{}'", config.user_agent),
			})?,
		);

		let client = Client::builder()
			.default_headers(headers)
			.build()
			.map_err(ApiError::HttpError)?;

		info!("Prediction client configured for {}", base_url);

		Ok(Self {
			client,
			base_url,
			config,
		})
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Join an endpoint path onto the base URL
	fn build_url(&self, path: &str) -> ApiResult<Url> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|e| ApiError::ConfigError {
				reason: format!(
					"Failed to join URL path '{}' to base '{}': {}",
					path, self.base_url, e
				),
			})
	}

	/// URL of the model list for `make`, with the make as one encoded path segment
	fn models_url(&self, make: &str) -> ApiResult<Url> {
		let mut url = self.build_url("car-models")?;
		url.path_segments_mut()
			.map_err(|_| ApiError::ConfigError {
				reason: format!("Base URL '{}' cannot carry a path", self.base_url),
			})?
			.push(make);
		Ok(url)
	}

	async fn get_json<T: DeserializeOwned>(&self, url: Url, endpoint: &str) -> ApiResult<T> {
		debug!("Fetching {} from {}", endpoint, url);

		let response = self
			.client
			.get(url)
			.timeout(self.config.request_timeout)
			.send()
			.await
			.map_err(|e| Self::map_send_error(e, self.config.request_timeout))?;

		Self::parse_body(response, endpoint).await
	}

	async fn parse_body<T: DeserializeOwned>(response: Response, endpoint: &str) -> ApiResult<T> {
		let status = response.status();
		if !status.is_success() {
			return Err(ApiError::from_http_failure(status.as_u16()));
		}

		let body = response.text().await.map_err(ApiError::HttpError)?;
		debug!(
			"{} endpoint responded successfully with {} bytes",
			endpoint,
			body.len()
		);

		serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse {
			reason: format!("Failed to parse {} response: {}", endpoint, e),
		})
	}

	fn map_send_error(error: reqwest::Error, timeout: Duration) -> ApiError {
		if error.is_timeout() {
			ApiError::Timeout {
				timeout_ms: timeout.as_millis() as u64,
			}
		} else {
			ApiError::HttpError(error)
		}
	}
}

#[async_trait]
impl PredictionApi for HttpPredictionClient {
	async fn get_makes(&self) -> ApiResult<Vec<String>> {
		let url = self.build_url("car-makes")?;
		let response: MakesResponse = self.get_json(url, "car-makes").await?;
		Ok(response.makes)
	}

	async fn get_models(&self, make: &str) -> ApiResult<Vec<String>> {
		let url = self.models_url(make)?;
		let response: ModelsResponse = self.get_json(url, "car-models").await?;
		Ok(response.models)
	}

	async fn get_locations(&self) -> ApiResult<Vec<String>> {
		let url = self.build_url("locations")?;
		let response: LocationsResponse = self.get_json(url, "locations").await?;
		Ok(response.locations)
	}

	async fn predict(&self, form: &FormData) -> ApiResult<PredictionResult> {
		let url = self.build_url("predict")?;
		debug!(
			"Requesting prediction for {} {} ({:?})",
			form.make, form.model, form.year
		);

		let response = self
			.client
			.post(url)
			.json(form)
			.timeout(self.config.predict_timeout)
			.send()
			.await
			.map_err(|e| Self::map_send_error(e, self.config.predict_timeout))?;

		Self::parse_body(response, "predict").await
	}
}
