//! Option lists for the form's select fields
//!
//! Remote failures never escape this module: they are logged and replaced by
//! the static fallback catalog.

use dashmap::DashMap;
use predictor_types::{FallbackCatalog, InitialOptions, OptionSet, PredictionApi};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Loads makes, locations and per-make models from the prediction service
#[derive(Debug)]
pub struct OptionsProvider {
	api: Arc<dyn PredictionApi>,
	initial: RwLock<InitialOptions>,
	// Memoised successful fetches
	models_by_make: DashMap<String, Vec<String>>,
	// Last list served for every make requested this session, fallback included
	visited: DashMap<String, Vec<String>>,
	cache_models: bool,
}

impl OptionsProvider {
	/// Create a provider that memoises successful model lists
	pub fn new(api: Arc<dyn PredictionApi>) -> Self {
		Self {
			api,
			initial: RwLock::new(InitialOptions::default()),
			models_by_make: DashMap::new(),
			visited: DashMap::new(),
			cache_models: true,
		}
	}

	/// Turn per-make memoisation on or off
	pub fn with_model_cache(mut self, enabled: bool) -> Self {
		self.cache_models = enabled;
		self
	}

	/// Fetch makes and locations concurrently
	///
	/// Both reads must succeed for the remote lists to be used; if either fails
	/// the fallback catalog supplies both.
	pub async fn load_initial_options(&self) -> InitialOptions {
		let (makes, locations) = tokio::join!(self.api.get_makes(), self.api.get_locations());

		let options = match (makes, locations) {
			(Ok(makes), Ok(locations)) => {
				info!(
					"Loaded {} makes and {} locations from prediction service",
					makes.len(),
					locations.len()
				);
				InitialOptions { makes, locations }
			},
			(makes, locations) => {
				if let Err(e) = makes {
					warn!("Failed to load car makes: {}", e);
				}
				if let Err(e) = locations {
					warn!("Failed to load locations: {}", e);
				}
				warn!("Using fallback makes and locations");
				FallbackCatalog::initial_options()
			},
		};

		*self.initial.write().await = options.clone();
		options
	}

	/// Fetch the models offered for `make`, falling back to the static table
	pub async fn load_models_for(&self, make: &str) -> Vec<String> {
		if self.cache_models {
			if let Some(models) = self.models_by_make.get(make) {
				debug!("Using cached models for make {}", make);
				return models.clone();
			}
		}

		let models = match self.api.get_models(make).await {
			Ok(models) => {
				debug!("Loaded {} models for make {}", models.len(), make);
				if self.cache_models {
					self.models_by_make.insert(make.to_string(), models.clone());
				}
				models
			},
			Err(e) => {
				warn!("Failed to load models for make {}: {}", make, e);
				FallbackCatalog::models_for(make)
			},
		};

		self.visited.insert(make.to_string(), models.clone());
		models
	}

	/// Model list previously fetched for `make`, if memoised
	pub fn cached_models(&self, make: &str) -> Option<Vec<String>> {
		self.models_by_make.get(make).map(|models| models.clone())
	}

	/// Current view of every list this provider owns
	///
	/// `models_by_make` has one entry per make requested so far, holding the
	/// list last served for it, whether fetched, cached or from the fallback.
	pub async fn option_set(&self) -> OptionSet {
		let initial = self.initial.read().await.clone();
		let models_by_make: HashMap<String, Vec<String>> = self
			.visited
			.iter()
			.map(|entry| (entry.key().clone(), entry.value().clone()))
			.collect();

		OptionSet {
			makes: initial.makes,
			locations: initial.locations,
			models_by_make,
		}
	}
}
