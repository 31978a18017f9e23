//! GoStock notification core — library crate for integration testing.
//!
//! Re-exports modules needed by integration tests in `tests/`.

pub mod api;
pub mod broadcast;
pub mod config;
pub mod errors;
pub mod feed;
pub mod jobs;
pub mod models;
pub mod publisher;
pub mod store;
