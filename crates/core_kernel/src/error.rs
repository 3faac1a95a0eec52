//! Core error types used across the system

use thiserror::Error;
use crate::identifiers::IdError;
use crate::temporal::TemporalError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Identifier error: {0}")]
    Id(#[from] IdError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
