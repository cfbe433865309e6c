//! Predictor Service
//!
//! Option loading, form state and the submission pipeline.

pub mod form_state;
pub mod mocks;
pub mod options;
pub mod submission;

pub use form_state::{FormStateController, FormView, ModelReload};
pub use options::OptionsProvider;
pub use submission::{
	ResultConsumer, SubmissionPipeline, SubmissionState, SubmitOutcome, DEFAULT_PREDICT_TIMEOUT,
};
