//! Shared helpers for the backend's unit and integration tests: one-time
//! logging setup and assertions on problem+json error bodies.

pub mod problem_details;
pub mod test_logging;
