//! Predictor Types
//!
//! Shared models, validation rules and the remote service trait for the
//! resale price predictor.

pub mod api;
pub mod catalog;
pub mod form;
pub mod prediction;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use api::{
	ApiError, ApiResult, LocationsResponse, MakesResponse, ModelsResponse, PredictionApi,
};
pub use catalog::{
	FallbackCatalog, InitialOptions, OptionSet, FUEL_TYPES, OWNER_TYPES, TRANSMISSION_TYPES,
};
pub use form::{
	validate, validate_for_year, FormData, FormField, UnknownFieldError, ValidationErrors,
	MIN_MODEL_YEAR,
};
pub use prediction::{PredictedPrice, PredictionResult, PREDICTION_FAILED_MESSAGE};
