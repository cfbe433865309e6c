//! Vehicle description form
//!
//! `FormData` is an immutable snapshot: every field update produces a new value
//! through [`FormData::with_field`] and the previous snapshot is left untouched.

pub mod validation;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use validation::{
	validate, validate_for_year, ValidationErrors, MIN_MODEL_YEAR, MSG_FUEL_REQUIRED,
	MSG_KMS_REQUIRED, MSG_LOCATION_REQUIRED, MSG_MAKE_REQUIRED, MSG_MODEL_REQUIRED,
	MSG_OWNER_REQUIRED, MSG_TRANSMISSION_REQUIRED, MSG_YEAR_REQUIRED,
};

/// Names of the fields a user can edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
	Make,
	Model,
	Year,
	Fuel,
	KmsDriven,
	Transmission,
	Owner,
	Location,
}

impl FormField {
	/// All fields in form order
	pub const ALL: [FormField; 8] = [
		FormField::Make,
		FormField::Model,
		FormField::Year,
		FormField::Fuel,
		FormField::KmsDriven,
		FormField::Transmission,
		FormField::Owner,
		FormField::Location,
	];

	/// Wire name used in JSON payloads and error maps
	pub fn as_str(&self) -> &'static str {
		match self {
			FormField::Make => "make",
			FormField::Model => "model",
			FormField::Year => "year",
			FormField::Fuel => "fuel",
			FormField::KmsDriven => "kms_driven",
			FormField::Transmission => "transmission",
			FormField::Owner => "owner",
			FormField::Location => "location",
		}
	}

	/// Whether the field carries a number rather than a selected option
	pub fn is_numeric(&self) -> bool {
		matches!(self, FormField::Year | FormField::KmsDriven)
	}
}

impl fmt::Display for FormField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown form field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for FormField {
	type Err = UnknownFieldError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		FormField::ALL
			.iter()
			.copied()
			.find(|field| field.as_str() == s)
			.ok_or_else(|| UnknownFieldError(s.to_string()))
	}
}

/// Snapshot of everything the user entered
///
/// `year` and `kms_driven` are `None` when the input is empty or not a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
	#[serde(default)]
	pub make: String,
	#[serde(default)]
	pub model: String,
	#[serde(default)]
	pub year: Option<i32>,
	#[serde(default)]
	pub fuel: String,
	#[serde(default)]
	pub kms_driven: Option<i64>,
	#[serde(default)]
	pub transmission: String,
	#[serde(default)]
	pub owner: String,
	#[serde(default)]
	pub location: String,
}

impl Default for FormData {
	/// Blank form with the year preset to the current calendar year
	fn default() -> Self {
		Self {
			make: String::new(),
			model: String::new(),
			year: Some(Utc::now().year()),
			fuel: String::new(),
			kms_driven: None,
			transmission: String::new(),
			owner: String::new(),
			location: String::new(),
		}
	}
}

impl FormData {
	/// Return a new snapshot with `field` replaced by the raw user input
	pub fn with_field(&self, field: FormField, raw: &str) -> FormData {
		let mut next = self.clone();
		match field {
			FormField::Make => next.make = raw.to_string(),
			FormField::Model => next.model = raw.to_string(),
			FormField::Year => next.year = parse_number(raw),
			FormField::Fuel => next.fuel = raw.to_string(),
			FormField::KmsDriven => next.kms_driven = parse_number(raw),
			FormField::Transmission => next.transmission = raw.to_string(),
			FormField::Owner => next.owner = raw.to_string(),
			FormField::Location => next.location = raw.to_string(),
		}
		next
	}

	/// Current value of a field as the user would see it in an input box
	pub fn value_of(&self, field: FormField) -> String {
		match field {
			FormField::Make => self.make.clone(),
			FormField::Model => self.model.clone(),
			FormField::Year => self.year.map(|y| y.to_string()).unwrap_or_default(),
			FormField::Fuel => self.fuel.clone(),
			FormField::KmsDriven => self.kms_driven.map(|k| k.to_string()).unwrap_or_default(),
			FormField::Transmission => self.transmission.clone(),
			FormField::Owner => self.owner.clone(),
			FormField::Location => self.location.clone(),
		}
	}
}

/// Whole-number value of a numeric input; decimals are truncated toward zero
fn parse_number<T: TryFrom<i64>>(raw: &str) -> Option<T> {
	let raw = raw.trim();
	let whole = match raw.parse::<i64>() {
		Ok(value) => value,
		Err(_) => {
			let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
			if value.abs() >= i64::MAX as f64 {
				return None;
			}
			value.trunc() as i64
		},
	};
	T::try_from(whole).ok()
}
