//! Shared fixtures and a live prediction service for integration tests

pub mod fixtures;
pub mod test_server;

#[allow(unused_imports)]
pub use fixtures::Fixtures;
#[allow(unused_imports)]
pub use test_server::{ServerBehavior, TestServer};
