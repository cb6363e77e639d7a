//! Error types for the generation domain

use thiserror::Error;

/// Errors that abort a generation run
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Spec error: {0}")]
    SpecError(String),

    #[error("Path parameter mismatch in operation {operation}: {detail}")]
    PathParameterMismatch { operation: String, detail: String },

    #[error("Duplicate identifier `{identifier}` in operation {operation}")]
    DuplicateIdentifier {
        operation: String,
        identifier: String,
    },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("OpenAPI loading error: {0}")]
    LoadError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GenerationError {
    /// Create a new spec error
    pub fn spec<S: Into<String>>(msg: S) -> Self {
        Self::SpecError(msg.into())
    }

    /// Create a new path mismatch error
    pub fn path_mismatch(operation: &str, detail: impl Into<String>) -> Self {
        Self::PathParameterMismatch {
            operation: operation.to_string(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_mismatch_display() {
        let error = GenerationError::path_mismatch("getPet", "placeholder {petId} has no path parameter");
        assert_eq!(
            error.to_string(),
            "Path parameter mismatch in operation getPet: placeholder {petId} has no path parameter"
        );
    }

    #[test]
    fn test_spec_error_display() {
        let error = GenerationError::spec("API description declares no servers");
        assert!(matches!(error, GenerationError::SpecError(_)));
        assert_eq!(error.to_string(), "Spec error: API description declares no servers");
    }
}
