//! Selectable option values and the static fallback catalog
//!
//! The fallback tables are the single source of substitute data used whenever
//! the remote service cannot be reached, both for the initial make/location
//! lists and for per-make model lists.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const FUEL_TYPES: &[&str] = &["Petrol", "Diesel", "CNG", "LPG", "Electric"];

pub const TRANSMISSION_TYPES: &[&str] = &["Manual", "Automatic"];

pub const OWNER_TYPES: &[&str] = &[
	"First Owner",
	"Second Owner",
	"Third Owner",
	"Fourth & Above Owner",
];

const FALLBACK_MAKES: &[&str] = &[
	"Maruti",
	"Hyundai",
	"Honda",
	"Toyota",
	"Tata",
	"Mahindra",
	"Ford",
	"Volkswagen",
];

const FALLBACK_LOCATIONS: &[&str] = &[
	"Mumbai",
	"Delhi",
	"Bangalore",
	"Chennai",
	"Pune",
	"Kolkata",
	"Hyderabad",
	"Ahmedabad",
];

const FALLBACK_MODELS: &[(&str, &[&str])] = &[
	(
		"Maruti",
		&["Swift", "Baleno", "Alto", "Wagon R", "Dzire", "Vitara Brezza"],
	),
	(
		"Hyundai",
		&["i20", "Creta", "Verna", "Grand i10", "Santro", "Venue"],
	),
	("Honda", &["City", "Amaze", "Jazz", "WR-V", "Civic", "CR-V"]),
	(
		"Toyota",
		&["Innova", "Fortuner", "Corolla", "Camry", "Etios", "Yaris"],
	),
];

/// Make and location lists loaded when the form is first shown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialOptions {
	pub makes: Vec<String>,
	pub locations: Vec<String>,
}

/// Everything a user can currently pick from
///
/// `models_by_make` only holds makes visited during the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
	pub makes: Vec<String>,
	pub locations: Vec<String>,
	pub models_by_make: HashMap<String, Vec<String>>,
}

/// Static substitute data for an unreachable service
pub struct FallbackCatalog;

impl FallbackCatalog {
	pub fn makes() -> Vec<String> {
		to_owned(FALLBACK_MAKES)
	}

	pub fn locations() -> Vec<String> {
		to_owned(FALLBACK_LOCATIONS)
	}

	pub fn initial_options() -> InitialOptions {
		InitialOptions {
			makes: Self::makes(),
			locations: Self::locations(),
		}
	}

	/// Models known for `make`; unknown makes have none
	pub fn models_for(make: &str) -> Vec<String> {
		FALLBACK_MODELS
			.iter()
			.find(|(known, _)| *known == make)
			.map(|(_, models)| to_owned(models))
			.unwrap_or_default()
	}
}

fn to_owned(values: &[&str]) -> Vec<String> {
	values.iter().map(|v| v.to_string()).collect()
}
