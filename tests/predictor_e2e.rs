//! End-to-end tests driving the orchestrator against a live HTTP service

use resale_predictor::serde_json::json;
use resale_predictor::{
	FallbackCatalog, FormField, PredictedPrice, PredictionResult, PredictorBuilder,
	SubmissionState, SubmitOutcome, PREDICTION_FAILED_MESSAGE,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

mod mocks;
use mocks::{Fixtures, ServerBehavior, TestServer};

#[tokio::test]
async fn test_initialize_loads_remote_lists() {
	let server = TestServer::spawn().await.expect("Failed to start server");
	let predictor = PredictorBuilder::new()
		.with_settings(Fixtures::settings_for(&server.base_url))
		.build()
		.unwrap();

	let options = predictor.initialize().await;

	assert_eq!(options.makes, vec!["Maruti", "Land Rover", "Tata"]);
	assert_eq!(options.locations, vec!["Mumbai", "Pune"]);
	let view = predictor.form.view().await;
	assert_eq!(view.makes, options.makes);
	assert!(view.models.is_empty());
}

#[tokio::test]
async fn test_unreachable_service_uses_fallback_lists() {
	let predictor = PredictorBuilder::new()
		.with_settings(Fixtures::settings_for(Fixtures::unreachable_url()))
		.build()
		.unwrap();

	let options = predictor.initialize().await;
	assert_eq!(options, FallbackCatalog::initial_options());

	let reload = predictor
		.form
		.set_field(FormField::Make, "Hyundai")
		.await
		.unwrap();
	assert!(reload.settled().await);
	assert_eq!(
		predictor.form.models().await,
		FallbackCatalog::models_for("Hyundai")
	);
}

#[tokio::test]
async fn test_make_with_space_is_path_encoded() {
	let server = TestServer::spawn().await.expect("Failed to start server");
	let predictor = PredictorBuilder::new()
		.with_settings(Fixtures::settings_for(&server.base_url))
		.build()
		.unwrap();

	predictor
		.form
		.set_field(FormField::Make, "Land Rover")
		.await
		.unwrap()
		.settled()
		.await;

	assert_eq!(server.model_requests(), vec!["Land Rover"]);
	assert_eq!(predictor.form.models().await, vec!["Defender", "Discovery"]);
}

#[tokio::test]
async fn test_full_flow_delivers_server_result_unchanged() {
	let server = TestServer::spawn().await.expect("Failed to start server");
	let (tx, mut rx) = mpsc::unbounded_channel();
	let predictor = PredictorBuilder::new()
		.with_settings(Fixtures::settings_for(&server.base_url))
		.with_consumer(Arc::new(tx))
		.build()
		.unwrap();

	predictor.initialize().await;
	predictor.fill(&Fixtures::valid_form()).await;
	assert_eq!(
		predictor.form.models().await,
		vec!["Swift", "Baleno", "Dzire"]
	);

	let outcome = predictor.submit().await;

	let expected = PredictionResult::Success {
		predicted_price: PredictedPrice::Text("₹450,000".to_string()),
		confidence: Some("High".to_string()),
		market_analysis: Some(vec![
			"Popular model in Mumbai".to_string(),
			"Low mileage for its age".to_string(),
		]),
	};
	assert_eq!(outcome, SubmitOutcome::Completed(expected.clone()));
	assert_eq!(rx.recv().await, Some(expected));

	assert_eq!(
		server.predictions(),
		vec![json!({
			"make": "Maruti",
			"model": "Swift",
			"year": 2018,
			"fuel": "Petrol",
			"kms_driven": 45000,
			"transmission": "Manual",
			"owner": "First Owner",
			"location": "Mumbai"
		})]
	);
	assert!(!predictor.pipeline.is_loading());
	assert_eq!(predictor.pipeline.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_invalid_form_is_never_sent() {
	let server = TestServer::spawn().await.expect("Failed to start server");
	let predictor = PredictorBuilder::new()
		.with_settings(Fixtures::settings_for(&server.base_url))
		.build()
		.unwrap();

	let mut form = Fixtures::valid_form();
	form.year = Some(1985);
	form.kms_driven = Some(-1);
	predictor.fill(&form).await;

	match predictor.submit().await {
		SubmitOutcome::Invalid(errors) => {
			assert_eq!(
				errors.get(FormField::Year),
				Some("Valid year is required")
			);
			assert_eq!(
				errors.get(FormField::KmsDriven),
				Some("Valid kilometers driven is required")
			);
			assert_eq!(errors.len(), 2);
		},
		other => panic!("expected validation failure, got {:?}", other),
	}
	assert!(server.predictions().is_empty());
}

#[tokio::test]
async fn test_server_error_becomes_failure_message() {
	let server = TestServer::spawn_with(ServerBehavior::PredictFails)
		.await
		.expect("Failed to start server");
	let predictor = PredictorBuilder::new()
		.with_settings(Fixtures::settings_for(&server.base_url))
		.build()
		.unwrap();

	predictor.fill(&Fixtures::valid_form()).await;
	let outcome = predictor.submit().await;

	assert_eq!(
		outcome,
		SubmitOutcome::Completed(PredictionResult::failure(PREDICTION_FAILED_MESSAGE))
	);
	assert!(!predictor.pipeline.is_loading());
}

#[tokio::test]
async fn test_server_reported_error_passes_through() {
	let server =
		TestServer::spawn_with(ServerBehavior::PredictReportsError("Model not loaded".into()))
			.await
			.expect("Failed to start server");
	let predictor = PredictorBuilder::new()
		.with_settings(Fixtures::settings_for(&server.base_url))
		.build()
		.unwrap();

	predictor.fill(&Fixtures::valid_form()).await;
	let outcome = predictor.submit().await;

	assert_eq!(
		outcome,
		SubmitOutcome::Completed(PredictionResult::failure("Model not loaded"))
	);
}

#[tokio::test]
async fn test_slow_prediction_times_out() {
	let server = TestServer::spawn_with(ServerBehavior::PredictDelayed(Duration::from_secs(3)))
		.await
		.expect("Failed to start server");
	let mut settings = Fixtures::settings_for(&server.base_url);
	settings.timeouts.predict_ms = 100;
	let predictor = PredictorBuilder::new()
		.with_settings(settings)
		.build()
		.unwrap();

	predictor.fill(&Fixtures::valid_form()).await;
	let outcome = predictor.submit().await;

	assert_eq!(
		outcome,
		SubmitOutcome::Completed(PredictionResult::prediction_failed())
	);
	assert!(!predictor.pipeline.is_loading());
}
