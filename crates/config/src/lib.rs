//! Predictor Configuration
//!
//! Configuration management and startup utilities for the resale price predictor.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	ApiSettings, ConfigValidationError, LogFormat, LoggingSettings, OptionSettings, Settings,
	TimeoutSettings, API_URL_ENV, DEFAULT_API_URL,
};
pub use startup_logger::{log_service_info, log_settings, log_startup_complete};
