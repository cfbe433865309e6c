//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Default configuration file, extension resolved by the `config` crate
pub const DEFAULT_CONFIG_PATH: &str = "config/config";

#[derive(Error, Debug)]
pub enum ConfigLoadError {
	#[error("Failed to read configuration: {0}")]
	Source(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Invalid(#[from] crate::ConfigValidationError),
}

/// Load configuration from the default file and `PREDICTOR__*` environment overrides
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	load_config_from(DEFAULT_CONFIG_PATH)
}

/// Load configuration from `path` (optional) and `PREDICTOR__*` environment overrides
///
/// Nested keys use a double underscore, e.g. `PREDICTOR__TIMEOUTS__PREDICT_MS=3000`.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix("PREDICTOR")
				.prefix_separator("__")
				.separator("__"),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}
