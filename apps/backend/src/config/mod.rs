//! Environment-driven configuration.

pub mod server;
pub mod store;

use std::env;

use crate::error::AppError;

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

/// Optional environment variable; unset and blank values both read as `None`.
pub(crate) fn opt_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
