//! Resale Predictor Library
//!
//! Client-side orchestration for a used-vehicle resale price service:
//! option loading with fallbacks, form validation and the submission
//! pipeline.

use predictor_config::LogFormat;
use std::sync::Arc;
use tracing::info;

// Core domain types
pub use predictor_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	validate,
	ApiError,
	ApiResult,
	FallbackCatalog,
	FormData,
	FormField,
	InitialOptions,
	OptionSet,
	PredictedPrice,
	PredictionApi,
	PredictionResult,
	ValidationErrors,
	PREDICTION_FAILED_MESSAGE,
};

// Service layer
pub use predictor_service::{
	FormStateController, FormView, ModelReload, OptionsProvider, ResultConsumer,
	SubmissionPipeline, SubmissionState, SubmitOutcome,
};

// Adapters
pub use predictor_adapters::{HttpClientConfig, HttpPredictionClient};

// Config
pub use predictor_config::{
	load_config, log_service_info, log_settings, log_startup_complete, Settings,
};

pub mod models {
	pub use predictor_types::*;
}

pub mod config {
	pub use predictor_config::*;
}

pub mod adapters {
	pub use predictor_adapters::*;
}

pub mod service {
	pub use predictor_service::*;
}

pub mod mocks {
	pub use predictor_service::mocks::*;
}

// Re-export external dependencies for downstream consumers
pub use async_trait;
pub use reqwest;

/// Builder wiring settings, the remote client and the orchestrator parts
#[derive(Default)]
pub struct PredictorBuilder {
	settings: Option<Settings>,
	api: Option<Arc<dyn PredictionApi>>,
	consumers: Vec<Arc<dyn ResultConsumer>>,
}

impl PredictorBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Use a custom prediction service instead of the HTTP client
	pub fn with_api(mut self, api: Arc<dyn PredictionApi>) -> Self {
		self.api = Some(api);
		self
	}

	/// Register a result consumer on the submission pipeline
	pub fn with_consumer(mut self, consumer: Arc<dyn ResultConsumer>) -> Self {
		self.consumers.push(consumer);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Assemble the orchestrator; nothing is fetched until [`Predictor::initialize`]
	pub fn build(self) -> Result<Predictor, Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let api = match self.api {
			Some(api) => api,
			None => {
				let mut client_config = HttpClientConfig::new(settings.api_base_url())
					.with_timeouts(settings.request_timeout(), settings.predict_timeout());
				client_config.user_agent = settings.api.user_agent.clone();
				Arc::new(HttpPredictionClient::new(client_config)?) as Arc<dyn PredictionApi>
			},
		};

		let options = Arc::new(
			OptionsProvider::new(Arc::clone(&api)).with_model_cache(settings.options.cache_models),
		);
		let form = Arc::new(
			FormStateController::new(Arc::clone(&options))
				.with_clear_model_on_make_change(settings.options.clear_model_on_make_change),
		);
		let pipeline = self.consumers.into_iter().fold(
			SubmissionPipeline::new(Arc::clone(&form), api)
				.with_predict_timeout(settings.predict_timeout()),
			|pipeline, consumer| pipeline.with_consumer(consumer),
		);

		Ok(Predictor {
			options,
			form,
			pipeline: Arc::new(pipeline),
		})
	}
}

/// The assembled orchestrator
#[derive(Clone)]
pub struct Predictor {
	pub options: Arc<OptionsProvider>,
	pub form: Arc<FormStateController>,
	pub pipeline: Arc<SubmissionPipeline>,
}

impl Predictor {
	/// Load makes and locations, once
	pub async fn initialize(&self) -> InitialOptions {
		self.form.initialize().await
	}

	/// Apply every field of `form` as user input, waiting for the make's model
	/// list to settle before the model is chosen
	pub async fn fill(&self, form: &FormData) {
		for field in FormField::ALL {
			if let Some(reload) = self.form.set_field(field, &form.value_of(field)).await {
				reload.settled().await;
			}
		}
	}

	/// Submit the current form
	pub async fn submit(&self) -> SubmitOutcome {
		self.pipeline.submit().await
	}
}

/// Initialize tracing with configuration-based settings
pub fn init_tracing_from_settings(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
	// Create env filter using config level or environment variable
	let log_level = &settings.logging.level;
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	// Diagnostics go to stderr so stdout stays machine-readable
	let installed = match settings.logging.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt()
				.json()
				.with_writer(std::io::stderr)
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()
			} else {
				subscriber.try_init()
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.pretty()
				.with_writer(std::io::stderr)
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()
			} else {
				subscriber.try_init()
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.compact()
				.with_writer(std::io::stderr)
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()
			} else {
				subscriber.try_init()
			}
		},
	};
	installed.map_err(|e| e as Box<dyn std::error::Error>)?;

	info!(
		"Logging configuration applied: level={}, format={:?}, structured={}",
		settings.logging.level, settings.logging.format, settings.logging.structured
	);

	Ok(())
}
