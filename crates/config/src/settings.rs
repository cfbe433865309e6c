//! Configuration settings structures

use crate::configurable_value::ConfigurableValue;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable consulted for the service base URL
pub const API_URL_ENV: &str = "PREDICTOR_API_URL";

/// Base URL used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub api: ApiSettings,
	pub timeouts: TimeoutSettings,
	pub options: OptionSettings,
	pub logging: LoggingSettings,
}

/// Remote prediction service location
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiSettings {
	/// Base URL of the prediction service
	///
	/// Example configurations:
	/// - Environment variable: `{"type": "env", "value": "PREDICTOR_API_URL"}`
	/// - Plain value: `{"type": "plain", "value": "https://predict.example.com"}`
	pub base_url: ConfigurableValue,
	pub user_agent: String,
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Per-request timeout for option-list reads
	pub request_ms: u64,
	/// Upper bound for a whole prediction call
	pub predict_ms: u64,
}

/// Option loading and cascade behaviour
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OptionSettings {
	/// Reuse a make's model list once it has been fetched successfully
	pub cache_models: bool,
	/// Reset the selected model whenever the make changes
	pub clear_model_on_make_change: bool,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Problems found when checking loaded settings
#[derive(Error, Debug)]
pub enum ConfigValidationError {
	#[error("Invalid API base URL '{url}': {reason}")]
	InvalidBaseUrl { url: String, reason: String },

	#[error("Invalid timeout: {field} must be greater than zero")]
	InvalidTimeout { field: String },
}

impl Default for ApiSettings {
	fn default() -> Self {
		Self {
			base_url: ConfigurableValue::from_env(API_URL_ENV),
			user_agent: format!("resale-predictor/{}", env!("CARGO_PKG_VERSION")),
		}
	}
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			request_ms: 5000,
			predict_ms: 15000,
		}
	}
}

impl Default for OptionSettings {
	fn default() -> Self {
		Self {
			cache_models: true,
			clear_model_on_make_change: true,
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

impl Settings {
	/// Settings pointing at an explicit base URL, everything else default
	pub fn with_base_url(base_url: &str) -> Self {
		let mut settings = Self::default();
		settings.api.base_url = ConfigurableValue::from_plain(base_url);
		settings
	}

	/// Resolve the service base URL, falling back to the local default when the
	/// configured environment variable is unset
	pub fn api_base_url(&self) -> String {
		self.api.base_url.resolve_or(DEFAULT_API_URL)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.timeouts.request_ms)
	}

	pub fn predict_timeout(&self) -> Duration {
		Duration::from_millis(self.timeouts.predict_ms)
	}

	/// Check values that deserialization alone cannot enforce
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		let base_url = self.api_base_url();
		let parsed = Url::parse(&base_url).map_err(|e| ConfigValidationError::InvalidBaseUrl {
			url: base_url.clone(),
			reason: e.to_string(),
		})?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(ConfigValidationError::InvalidBaseUrl {
				url: base_url,
				reason: format!("unsupported scheme '{}'", parsed.scheme()),
			});
		}

		if self.timeouts.request_ms == 0 {
			return Err(ConfigValidationError::InvalidTimeout {
				field: "timeouts.request_ms".to_string(),
			});
		}
		if self.timeouts.predict_ms == 0 {
			return Err(ConfigValidationError::InvalidTimeout {
				field: "timeouts.predict_ms".to_string(),
			});
		}

		Ok(())
	}
}
