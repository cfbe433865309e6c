//! Prediction outcome delivered to the result view

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown whenever the prediction call fails
pub const PREDICTION_FAILED_MESSAGE: &str = "Failed to predict car price. Please try again.";

/// Price as returned by the service: preformatted text or a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictedPrice {
	Text(String),
	Amount(serde_json::Number),
}

impl fmt::Display for PredictedPrice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PredictedPrice::Text(text) => f.write_str(text),
			PredictedPrice::Amount(amount) => write!(f, "{}", amount),
		}
	}
}

impl From<&str> for PredictedPrice {
	fn from(value: &str) -> Self {
		PredictedPrice::Text(value.to_string())
	}
}

/// Either an estimate or a user-facing error
///
/// Serialized without a tag so both shapes match the wire format:
/// `{predicted_price, confidence?, market_analysis?}` and
/// `{error, predicted_price: null}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResult {
	Failure {
		error: String,
		// Always null on the wire
		predicted_price: Option<PredictedPrice>,
	},
	Success {
		predicted_price: PredictedPrice,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		confidence: Option<String>,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		market_analysis: Option<Vec<String>>,
	},
}

impl PredictionResult {
	pub fn success(predicted_price: impl Into<PredictedPrice>) -> Self {
		PredictionResult::Success {
			predicted_price: predicted_price.into(),
			confidence: None,
			market_analysis: None,
		}
	}

	pub fn failure(error: impl Into<String>) -> Self {
		PredictionResult::Failure {
			error: error.into(),
			predicted_price: None,
		}
	}

	/// The result synthesized when the service call fails for any reason
	pub fn prediction_failed() -> Self {
		Self::failure(PREDICTION_FAILED_MESSAGE)
	}

	pub fn is_success(&self) -> bool {
		matches!(self, PredictionResult::Success { .. })
	}

	pub fn error(&self) -> Option<&str> {
		match self {
			PredictionResult::Failure { error, .. } => Some(error),
			PredictionResult::Success { .. } => None,
		}
	}

	pub fn predicted_price(&self) -> Option<&PredictedPrice> {
		match self {
			PredictionResult::Success {
				predicted_price, ..
			} => Some(predicted_price),
			PredictionResult::Failure { .. } => None,
		}
	}
}
