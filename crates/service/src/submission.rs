//! Submit → validate → predict → deliver
//!
//! ```text
//! Idle → Validating → Invalid ─────────────────────→ Idle
//!                   ↘ Submitting → Succeeded | Failed → Idle
//! ```
//!
//! An attempt claims the pipeline before its first transition and releases it
//! after its last, so a concurrent `submit` can never touch another attempt's
//! state. The loading flag is raised on entering `Submitting` and is always
//! lowered, including when the submitting future is dropped mid-flight.

use crate::form_state::FormStateController;
use predictor_types::{validate, PredictionApi, PredictionResult, ValidationErrors};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, RwLock};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Default upper bound on a prediction call
pub const DEFAULT_PREDICT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
	Idle,
	Validating,
	Invalid,
	Submitting,
	Succeeded,
	Failed,
}

/// What a single submit attempt did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// Validation failed; nothing was sent
	Invalid(ValidationErrors),
	/// The service was called and this result was delivered
	Completed(PredictionResult),
	/// Another submission is still in flight; nothing was sent
	Busy,
}

/// Receives every prediction result, e.g. the result view
pub trait ResultConsumer: Send + Sync {
	fn on_result(&self, result: &PredictionResult);
}

impl ResultConsumer for mpsc::UnboundedSender<PredictionResult> {
	fn on_result(&self, result: &PredictionResult) {
		if self.send(result.clone()).is_err() {
			debug!("Result receiver dropped");
		}
	}
}

/// Releases the attempt's claim when it ends, however it ends
struct AttemptGuard<'a> {
	in_flight: &'a AtomicBool,
	loading: &'a AtomicBool,
	state: &'a watch::Sender<SubmissionState>,
}

impl Drop for AttemptGuard<'_> {
	fn drop(&mut self) {
		self.loading.store(false, Ordering::SeqCst);
		// An abandoned attempt must not leave the pipeline stuck mid-flight
		self.state.send_if_modified(|state| {
			if matches!(*state, SubmissionState::Validating | SubmissionState::Submitting) {
				*state = SubmissionState::Idle;
				true
			} else {
				false
			}
		});
		self.in_flight.store(false, Ordering::SeqCst);
	}
}

/// Drives one form through validation and the prediction call
pub struct SubmissionPipeline {
	form: Arc<FormStateController>,
	api: Arc<dyn PredictionApi>,
	predict_timeout: Duration,
	in_flight: AtomicBool,
	loading: AtomicBool,
	state: watch::Sender<SubmissionState>,
	last_result: RwLock<Option<PredictionResult>>,
	consumers: Vec<Arc<dyn ResultConsumer>>,
}

impl SubmissionPipeline {
	pub fn new(form: Arc<FormStateController>, api: Arc<dyn PredictionApi>) -> Self {
		let (state, _) = watch::channel(SubmissionState::Idle);
		Self {
			form,
			api,
			predict_timeout: DEFAULT_PREDICT_TIMEOUT,
			in_flight: AtomicBool::new(false),
			loading: AtomicBool::new(false),
			state,
			last_result: RwLock::new(None),
			consumers: Vec::new(),
		}
	}

	pub fn with_predict_timeout(mut self, predict_timeout: Duration) -> Self {
		self.predict_timeout = predict_timeout;
		self
	}

	pub fn with_consumer(mut self, consumer: Arc<dyn ResultConsumer>) -> Self {
		self.consumers.push(consumer);
		self
	}

	pub fn is_loading(&self) -> bool {
		self.loading.load(Ordering::SeqCst)
	}

	pub fn state(&self) -> SubmissionState {
		*self.state.borrow()
	}

	/// Observe every state transition
	pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
		self.state.subscribe()
	}

	/// Result of the most recent completed submission
	pub async fn last_result(&self) -> Option<PredictionResult> {
		self.last_result.read().await.clone()
	}

	/// Validate the current form and, if it passes, request a prediction
	///
	/// Only one attempt runs at a time; a call made while another is between
	/// validation and delivery returns [`SubmitOutcome::Busy`] and leaves the
	/// state untouched.
	pub async fn submit(&self) -> SubmitOutcome {
		if self
			.in_flight
			.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
			.is_err()
		{
			warn!("Submission ignored: a prediction is already in flight");
			return SubmitOutcome::Busy;
		}
		let guard = AttemptGuard {
			in_flight: &self.in_flight,
			loading: &self.loading,
			state: &self.state,
		};

		self.transition(SubmissionState::Validating);
		let snapshot = self.form.snapshot().await;
		let errors = validate(&snapshot);
		self.form.set_errors(errors.clone()).await;

		if !errors.is_empty() {
			let fields: Vec<&str> = errors.fields().map(|f| f.as_str()).collect();
			info!("Submission blocked by validation errors on {:?}", fields);
			self.transition(SubmissionState::Invalid);
			self.transition(SubmissionState::Idle);
			drop(guard);
			return SubmitOutcome::Invalid(errors);
		}

		self.loading.store(true, Ordering::SeqCst);
		self.transition(SubmissionState::Submitting);

		let (terminal, result) = match timeout(self.predict_timeout, self.api.predict(&snapshot)).await
		{
			Ok(Ok(result)) => {
				info!(
					"Prediction received for {} {}: {}",
					snapshot.make,
					snapshot.model,
					result
						.predicted_price()
						.map(|p| p.to_string())
						.unwrap_or_else(|| "no price".to_string())
				);
				(SubmissionState::Succeeded, result)
			},
			Ok(Err(e)) => {
				warn!("Prediction request failed: {}", e);
				(SubmissionState::Failed, PredictionResult::prediction_failed())
			},
			Err(_) => {
				warn!(
					"Prediction request timed out after {}ms",
					self.predict_timeout.as_millis()
				);
				(SubmissionState::Failed, PredictionResult::prediction_failed())
			},
		};

		*self.last_result.write().await = Some(result.clone());
		for consumer in &self.consumers {
			consumer.on_result(&result);
		}

		self.transition(terminal);
		self.loading.store(false, Ordering::SeqCst);
		self.transition(SubmissionState::Idle);
		drop(guard);

		SubmitOutcome::Completed(result)
	}

	fn transition(&self, next: SubmissionState) {
		let previous = self.state.send_replace(next);
		debug!("Submission state {:?} -> {:?}", previous, next);
	}
}
