//! Remote service contract

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::ApiError;
pub use models::{LocationsResponse, MakesResponse, ModelsResponse};
pub use traits::PredictionApi;

pub type ApiResult<T> = Result<T, ApiError>;
