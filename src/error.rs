use thiserror::Error;

/// Errors that can occur while estimating carbon density.
#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Math domain error: {0}")]
    DomainMath(String),

    #[error("Collaborator '{service}' failed: {message}")]
    Collaborator { service: String, message: String },

    #[error("Export error: {0}")]
    Export(String),
}

impl EstimatorError {
    /// Build a `Collaborator` error for the named external service.
    pub fn collaborator(service: impl Into<String>, message: impl Into<String>) -> Self {
        EstimatorError::Collaborator {
            service: service.into(),
            message: message.into(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for EstimatorError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        EstimatorError::Export(e.to_string())
    }
}
