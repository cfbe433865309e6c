//! Startup logging for the resale predictor

use crate::Settings;
use std::env;
use tracing::info;

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "resale-predictor";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Resale Predictor Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the effective settings once they are loaded
pub fn log_settings(settings: &Settings) {
	info!(
		"🌐 Prediction service: {} (from {})",
		settings.api_base_url(),
		settings.api.base_url.description()
	);
	info!(
		"⏱️ Timeouts: {}ms per option request, {}ms per prediction",
		settings.timeouts.request_ms, settings.timeouts.predict_ms
	);
	info!(
		"📋 Model cache: {}, clear model on make change: {}",
		settings.options.cache_models, settings.options.clear_model_on_make_change
	);
}

/// Logs completion of orchestrator setup
pub fn log_startup_complete(makes: usize, locations: usize) {
	info!("✅ Resale Predictor Ready");
	info!("📡 {} makes and {} locations available", makes, locations);
}
