//! Form payloads and settings used across integration tests

#![allow(dead_code)]

use resale_predictor::{FormData, Settings};

pub struct Fixtures;

impl Fixtures {
	/// A Maruti Swift that passes every validation rule
	pub fn valid_form() -> FormData {
		FormData {
			make: "Maruti".to_string(),
			model: "Swift".to_string(),
			year: Some(2018),
			fuel: "Petrol".to_string(),
			kms_driven: Some(45000),
			transmission: "Manual".to_string(),
			owner: "First Owner".to_string(),
			location: "Mumbai".to_string(),
		}
	}

	/// Settings pointing at `base_url` with short timeouts
	pub fn settings_for(base_url: &str) -> Settings {
		let mut settings = Settings::with_base_url(base_url);
		settings.timeouts.request_ms = 500;
		settings.timeouts.predict_ms = 1000;
		settings
	}

	/// Nothing listens on port 9 of the loopback interface
	pub fn unreachable_url() -> &'static str {
		"http://127.0.0.1:9"
	}
}
