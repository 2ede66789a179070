//! Error types for MathPulse.

use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MathPulseError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MathPulseError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            MathPulseError::InvalidRequest(_) => "invalid_request",
            MathPulseError::Io(_) => "io_error",
            MathPulseError::Json(_) => "invalid_json",
            MathPulseError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status the daemon answers with
    pub fn http_status(&self) -> u16 {
        match self {
            MathPulseError::InvalidRequest(_) | MathPulseError::Json(_) => 400,
            MathPulseError::Io(_) | MathPulseError::Internal(_) => 500,
        }
    }
}

/// Read and deserialize a JSON file
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, MathPulseError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
