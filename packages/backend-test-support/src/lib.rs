//! Test support utilities for the Contaminados backend.
//!
//! Shared by the backend's unit and integration tests: logging setup,
//! response contract assertions and unique test data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
