//! Resale Predictor CLI
//!
//! Loads the option lists and, when given a path to a JSON form, submits it
//! and prints the prediction result to stdout.

use resale_predictor::{
	init_tracing_from_settings, load_config, log_service_info, log_settings,
	log_startup_complete, serde_json, FormData, PredictorBuilder, SubmitOutcome,
};
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
	// Load .env file if it exists
	dotenvy::dotenv().ok();

	let settings = load_config()?;
	init_tracing_from_settings(&settings)?;
	log_service_info();
	log_settings(&settings);

	let predictor = PredictorBuilder::new().with_settings(settings).build()?;
	let options = predictor.initialize().await;
	log_startup_complete(options.makes.len(), options.locations.len());

	let Some(path) = std::env::args().nth(1) else {
		println!("{}", serde_json::to_string_pretty(&predictor.form.view().await)?);
		return Ok(ExitCode::SUCCESS);
	};

	let raw = std::fs::read_to_string(&path)
		.map_err(|e| format!("Failed to read form file '{}': {}", path, e))?;
	let form: FormData = serde_json::from_str(&raw)
		.map_err(|e| format!("Failed to parse form file '{}': {}", path, e))?;
	info!("Submitting form from {}", path);

	predictor.fill(&form).await;
	match predictor.submit().await {
		SubmitOutcome::Completed(result) => {
			println!("{}", serde_json::to_string_pretty(&result)?);
			Ok(if result.is_success() {
				ExitCode::SUCCESS
			} else {
				ExitCode::FAILURE
			})
		},
		SubmitOutcome::Invalid(errors) => {
			for (field, message) in errors.iter() {
				warn!("{}: {}", field, message);
			}
			println!("{}", serde_json::to_string_pretty(&errors)?);
			Ok(ExitCode::from(2))
		},
		SubmitOutcome::Busy => {
			error!("A submission is already in flight");
			Ok(ExitCode::FAILURE)
		},
	}
}
