//! Response bodies of the option-list endpoints
//!
//! A missing list key is read as an empty list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakesResponse {
	#[serde(default)]
	pub makes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsResponse {
	#[serde(default)]
	pub models: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationsResponse {
	#[serde(default)]
	pub locations: Vec<String>,
}
