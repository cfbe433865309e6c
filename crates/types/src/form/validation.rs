//! Field-level validation rules for the vehicle form

use super::{FormData, FormField};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Oldest model year the prediction service accepts
pub const MIN_MODEL_YEAR: i32 = 1990;

pub const MSG_MAKE_REQUIRED: &str = "Make is required";
pub const MSG_MODEL_REQUIRED: &str = "Model is required";
pub const MSG_YEAR_REQUIRED: &str = "Valid year is required";
pub const MSG_FUEL_REQUIRED: &str = "Fuel type is required";
pub const MSG_KMS_REQUIRED: &str = "Valid kilometers driven is required";
pub const MSG_TRANSMISSION_REQUIRED: &str = "Transmission type is required";
pub const MSG_OWNER_REQUIRED: &str = "Owner type is required";
pub const MSG_LOCATION_REQUIRED: &str = "Location is required";

/// Human-readable messages keyed by the offending field
///
/// A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
	pub fn new() -> Self {
		Self::default()
	}

	/// True when no rule failed
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn get(&self, field: FormField) -> Option<&str> {
		self.0.get(&field).map(String::as_str)
	}

	pub fn contains(&self, field: FormField) -> bool {
		self.0.contains_key(&field)
	}

	pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
		self.0.insert(field, message.into());
	}

	/// Drop the error for one field, returning whether there was one
	pub fn clear(&mut self, field: FormField) -> bool {
		self.0.remove(&field).is_some()
	}

	/// Fields with errors, in form order
	pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
		self.0.keys().copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
		self.0.iter().map(|(field, message)| (*field, message.as_str()))
	}
}

/// Validate a snapshot against the current calendar year
pub fn validate(form: &FormData) -> ValidationErrors {
	validate_for_year(form, Utc::now().year())
}

/// Validate a snapshot; every rule runs and failures accumulate
pub fn validate_for_year(form: &FormData, current_year: i32) -> ValidationErrors {
	let mut errors = ValidationErrors::new();

	require_text(&mut errors, FormField::Make, &form.make, MSG_MAKE_REQUIRED);
	require_text(&mut errors, FormField::Model, &form.model, MSG_MODEL_REQUIRED);

	match form.year {
		Some(year) if (MIN_MODEL_YEAR..=current_year).contains(&year) => {},
		_ => errors.insert(FormField::Year, MSG_YEAR_REQUIRED),
	}

	require_text(&mut errors, FormField::Fuel, &form.fuel, MSG_FUEL_REQUIRED);

	// Zero kilometres is a legitimate reading for an unregistered car
	match form.kms_driven {
		Some(kms) if kms >= 0 => {},
		_ => errors.insert(FormField::KmsDriven, MSG_KMS_REQUIRED),
	}

	require_text(
		&mut errors,
		FormField::Transmission,
		&form.transmission,
		MSG_TRANSMISSION_REQUIRED,
	);
	require_text(&mut errors, FormField::Owner, &form.owner, MSG_OWNER_REQUIRED);
	require_text(
		&mut errors,
		FormField::Location,
		&form.location,
		MSG_LOCATION_REQUIRED,
	);

	errors
}

fn require_text(errors: &mut ValidationErrors, field: FormField, value: &str, message: &str) {
	if value.is_empty() {
		errors.insert(field, message);
	}
}
