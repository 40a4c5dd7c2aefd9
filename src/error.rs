//! Error types for warehouse-econ

use thiserror::Error;

/// Main error type for warehouse-econ
#[derive(Error, Debug)]
pub enum WarehouseError {
    #[error("Invalid parameters: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid parameter {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Computation fault: {0}")]
    ComputationFault(String),

    #[error("Cash flow series has no sign change")]
    NoSignChange,

    #[error("Solver did not converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl WarehouseError {
    /// Validation messages, if this is a validation error
    pub fn messages(&self) -> &[String] {
        match self {
            WarehouseError::Validation(messages) => messages,
            _ => &[],
        }
    }
}

/// Result type alias for warehouse-econ operations
pub type Result<T> = std::result::Result<T, WarehouseError>;
