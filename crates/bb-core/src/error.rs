//! # AppError
//!
//! Centralized error handling for the Bubble-Board core.
//! Every variant is local and non-fatal: a failed request leaves the
//! registry and broadcaster exactly as they were before the request.

use thiserror::Error;

/// The primary error type for all bb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad or missing input; rejected before any mutation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced entity does not exist (e.g. Post).
    #[error("{0} not found with id {1}")]
    NotFound(&'static str, String),

    /// External blob store unreachable or failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// A specialized Result type for Bubble-Board logic.
pub type Result<T> = std::result::Result<T, AppError>;
