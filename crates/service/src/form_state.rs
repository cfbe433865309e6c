//! Form state and the make → models cascade
//!
//! Every make change is stamped with a new request number. A model list that
//! arrives after a newer make change has been issued is dropped, so the list
//! on screen always belongs to the most recently chosen make.

use crate::options::OptionsProvider;
use predictor_types::{
	FormData, FormField, InitialOptions, UnknownFieldError, ValidationErrors, FUEL_TYPES,
	OWNER_TYPES, TRANSMISSION_TYPES,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct FormState {
	form: FormData,
	errors: ValidationErrors,
	makes: Vec<String>,
	locations: Vec<String>,
	models: Vec<String>,
	models_loading: bool,
	latest_model_request: u64,
}

/// Read-only snapshot handed to whatever renders the form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
	pub form: FormData,
	pub errors: ValidationErrors,
	pub makes: Vec<String>,
	pub models: Vec<String>,
	pub locations: Vec<String>,
	pub fuel_types: Vec<String>,
	pub transmission_types: Vec<String>,
	pub owner_types: Vec<String>,
	pub models_loading: bool,
}

/// Pending model-list reload started by a make change
#[derive(Debug)]
pub struct ModelReload {
	make: String,
	sequence: u64,
	handle: JoinHandle<bool>,
}

impl ModelReload {
	pub fn make(&self) -> &str {
		&self.make
	}

	pub fn sequence(&self) -> u64 {
		self.sequence
	}

	/// Wait for the reload; `true` if its list was installed, `false` if a
	/// newer make change superseded it
	pub async fn settled(self) -> bool {
		match self.handle.await {
			Ok(applied) => applied,
			Err(e) => {
				warn!("Model reload for {} did not complete: {}", self.make, e);
				false
			},
		}
	}
}

/// Owns the current form snapshot and its error map
#[derive(Debug)]
pub struct FormStateController {
	options: Arc<OptionsProvider>,
	state: Arc<RwLock<FormState>>,
	initialized: OnceCell<InitialOptions>,
	clear_model_on_make_change: bool,
}

impl FormStateController {
	pub fn new(options: Arc<OptionsProvider>) -> Self {
		Self {
			options,
			state: Arc::new(RwLock::new(FormState::default())),
			initialized: OnceCell::new(),
			clear_model_on_make_change: true,
		}
	}

	/// Keep (`false`) or reset (`true`, default) the chosen model when the make changes
	pub fn with_clear_model_on_make_change(mut self, enabled: bool) -> Self {
		self.clear_model_on_make_change = enabled;
		self
	}

	/// Load makes and locations on first activation and install them
	///
	/// Later calls return the lists installed by the first one.
	pub async fn initialize(&self) -> InitialOptions {
		self.initialized
			.get_or_init(|| async {
				let options = self.options.load_initial_options().await;
				let mut state = self.state.write().await;
				state.makes = options.makes.clone();
				state.locations = options.locations.clone();
				info!(
					"Form initialized with {} makes and {} locations",
					options.makes.len(),
					options.locations.len()
				);
				options
			})
			.await
			.clone()
	}

	/// Replace one field with raw user input
	///
	/// Clears that field's error, if any, without revalidating the rest. When
	/// the make changes, the model list is invalidated and a reload is started;
	/// the returned handle resolves once that reload settles.
	pub async fn set_field(&self, field: FormField, raw: &str) -> Option<ModelReload> {
		let mut state = self.state.write().await;
		let previous_make = state.form.make.clone();

		state.form = state.form.with_field(field, raw);
		if state.errors.clear(field) {
			debug!("Cleared error on {}", field);
		}

		if field != FormField::Make || state.form.make == previous_make {
			return None;
		}

		state.latest_model_request += 1;
		let sequence = state.latest_model_request;
		state.models.clear();
		if self.clear_model_on_make_change && !state.form.model.is_empty() {
			debug!(
				"Make changed from {:?} to {:?}, clearing model {:?}",
				previous_make, state.form.make, state.form.model
			);
			state.form = state.form.with_field(FormField::Model, "");
		}

		let make = state.form.make.clone();
		if make.is_empty() {
			state.models_loading = false;
			return None;
		}
		state.models_loading = true;
		drop(state);

		let options = Arc::clone(&self.options);
		let shared = Arc::clone(&self.state);
		let requested = make.clone();
		let handle = tokio::spawn(async move {
			let models = options.load_models_for(&requested).await;

			let mut state = shared.write().await;
			if state.latest_model_request != sequence {
				debug!(
					"Discarding models for {} (request {} superseded by {})",
					requested, sequence, state.latest_model_request
				);
				return false;
			}
			debug!("Installing {} models for {}", models.len(), requested);
			state.models = models;
			state.models_loading = false;
			true
		});

		Some(ModelReload {
			make,
			sequence,
			handle,
		})
	}

	/// [`set_field`](Self::set_field) addressed by wire name
	pub async fn set_field_by_name(
		&self,
		name: &str,
		raw: &str,
	) -> Result<Option<ModelReload>, UnknownFieldError> {
		let field: FormField = name.parse()?;
		Ok(self.set_field(field, raw).await)
	}

	/// Copy of the current form
	pub async fn snapshot(&self) -> FormData {
		self.state.read().await.form.clone()
	}

	pub async fn errors(&self) -> ValidationErrors {
		self.state.read().await.errors.clone()
	}

	/// Replace the error map with the outcome of a validation pass
	pub async fn set_errors(&self, errors: ValidationErrors) {
		self.state.write().await.errors = errors;
	}

	/// Models offered for the currently selected make
	pub async fn models(&self) -> Vec<String> {
		self.state.read().await.models.clone()
	}

	pub async fn view(&self) -> FormView {
		let state = self.state.read().await;
		FormView {
			form: state.form.clone(),
			errors: state.errors.clone(),
			makes: state.makes.clone(),
			models: state.models.clone(),
			locations: state.locations.clone(),
			fuel_types: to_owned(FUEL_TYPES),
			transmission_types: to_owned(TRANSMISSION_TYPES),
			owner_types: to_owned(OWNER_TYPES),
			models_loading: state.models_loading,
		}
	}
}

fn to_owned(values: &[&str]) -> Vec<String> {
	values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mocks::MockPredictionApi;
	use predictor_types::{validate_for_year, FallbackCatalog};

	fn controller(api: &MockPredictionApi) -> FormStateController {
		let options = Arc::new(OptionsProvider::new(Arc::new(api.clone())));
		FormStateController::new(options)
	}

	#[tokio::test]
	async fn test_initialize_installs_lists_once() {
		let api = MockPredictionApi::new();
		let controller = controller(&api);

		let first = controller.initialize().await;
		let second = controller.initialize().await;

		assert_eq!(first, second);
		assert_eq!(api.makes_calls(), 1);
		let view = controller.view().await;
		assert_eq!(view.makes, vec!["Maruti", "Honda"]);
		assert_eq!(view.locations, vec!["Mumbai", "Delhi"]);
		assert_eq!(view.fuel_types.len(), 5);
		assert_eq!(view.owner_types[3], "Fourth & Above Owner");
	}

	#[tokio::test]
	async fn test_initialize_uses_fallback_when_unreachable() {
		let controller = controller(&MockPredictionApi::unreachable());
		controller.initialize().await;

		let view = controller.view().await;
		assert_eq!(view.makes, FallbackCatalog::makes());
		assert_eq!(view.locations, FallbackCatalog::locations());
	}

	#[tokio::test]
	async fn test_set_field_clears_only_that_error() {
		let controller = controller(&MockPredictionApi::new());
		let errors = validate_for_year(&controller.snapshot().await, 2025);
		controller.set_errors(errors).await;

		let reload = controller.set_field(FormField::Fuel, "Diesel").await;
		assert!(reload.is_none());

		let errors = controller.errors().await;
		assert!(!errors.contains(FormField::Fuel));
		assert!(errors.contains(FormField::Owner));
		assert!(errors.contains(FormField::Make));
		assert_eq!(controller.snapshot().await.fuel, "Diesel");
	}

	#[tokio::test]
	async fn test_make_change_loads_models() {
		let api = MockPredictionApi::new();
		let controller = controller(&api);

		let reload = controller
			.set_field(FormField::Make, "Honda")
			.await
			.expect("make change starts a reload");
		assert_eq!(reload.make(), "Honda");
		assert!(reload.settled().await);

		let view = controller.view().await;
		assert_eq!(view.models, vec!["City", "Amaze"]);
		assert!(!view.models_loading);
	}

	#[tokio::test]
	async fn test_same_make_does_not_reload() {
		let api = MockPredictionApi::new();
		let controller = controller(&api);

		controller
			.set_field(FormField::Make, "Honda")
			.await
			.unwrap()
			.settled()
			.await;
		assert!(controller.set_field(FormField::Make, "Honda").await.is_none());
		assert_eq!(api.models_requests(), vec!["Honda"]);
	}

	#[tokio::test]
	async fn test_make_change_clears_stale_model() {
		let controller = controller(&MockPredictionApi::new());

		controller
			.set_field(FormField::Make, "Maruti")
			.await
			.unwrap()
			.settled()
			.await;
		controller.set_field(FormField::Model, "Swift").await;

		let reload = controller.set_field(FormField::Make, "Honda").await.unwrap();
		assert_eq!(controller.snapshot().await.model, "");
		assert!(controller.models().await.is_empty());
		reload.settled().await;
	}

	#[tokio::test]
	async fn test_stale_model_kept_when_configured() {
		let options = Arc::new(OptionsProvider::new(Arc::new(MockPredictionApi::new())));
		let controller =
			FormStateController::new(options).with_clear_model_on_make_change(false);

		controller.set_field(FormField::Model, "Swift").await;
		controller
			.set_field(FormField::Make, "Honda")
			.await
			.unwrap()
			.settled()
			.await;

		assert_eq!(controller.snapshot().await.model, "Swift");
	}

	#[tokio::test]
	async fn test_out_of_order_model_responses_are_discarded() {
		let api = MockPredictionApi::new().with_model_delay("Maruti", 200);
		let controller = controller(&api);

		let slow = controller.set_field(FormField::Make, "Maruti").await.unwrap();
		let fast = controller.set_field(FormField::Make, "Honda").await.unwrap();
		assert!(fast.sequence() > slow.sequence());

		assert!(fast.settled().await);
		assert!(!slow.settled().await);

		assert_eq!(controller.models().await, vec!["City", "Amaze"]);
		assert_eq!(controller.snapshot().await.make, "Honda");
	}

	#[tokio::test]
	async fn test_clearing_make_clears_models_without_fetching() {
		let api = MockPredictionApi::new();
		let controller = controller(&api);

		controller
			.set_field(FormField::Make, "Honda")
			.await
			.unwrap()
			.settled()
			.await;
		assert!(controller.set_field(FormField::Make, "").await.is_none());

		assert!(controller.models().await.is_empty());
		assert_eq!(api.models_requests(), vec!["Honda"]);
	}

	#[tokio::test]
	async fn test_model_fallback_on_failure() {
		let controller = controller(&MockPredictionApi::new().failing_models());

		controller
			.set_field(FormField::Make, "Toyota")
			.await
			.unwrap()
			.settled()
			.await;
		assert_eq!(
			controller.models().await,
			FallbackCatalog::models_for("Toyota")
		);
	}

	#[tokio::test]
	async fn test_set_field_by_name() {
		let controller = controller(&MockPredictionApi::new());

		controller.set_field_by_name("kms_driven", "0").await.unwrap();
		assert_eq!(controller.snapshot().await.kms_driven, Some(0));

		let unknown = controller.set_field_by_name("colour", "red").await;
		assert!(unknown.is_err());
	}
}
