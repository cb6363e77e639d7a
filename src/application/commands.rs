//! Data Transfer Objects for application layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::ValidationError;

/// Request to generate a client module
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateClientRequest {
    /// File path or HTTP(S) URL of the OpenAPI document
    pub schema_path: String,
    /// File the module is written to
    pub output_path: PathBuf,
    /// Sent as `X-SDK-Version` by every generated function when set
    pub sdk_version: Option<String>,
}

impl GenerateClientRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schema_path.trim().is_empty() {
            return Err(ValidationError::MissingField("schema_path".to_string()));
        }

        if self.output_path.file_name().is_none() {
            return Err(ValidationError::InvalidOutputPath(
                self.output_path.display().to_string(),
            ));
        }

        if let Some(version) = &self.sdk_version {
            if version.trim().is_empty() || version.chars().any(char::is_control) {
                return Err(ValidationError::InvalidSdkVersion(version.clone()));
            }
        }

        Ok(())
    }
}

/// Response from client generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateClientResponse {
    pub output_path: PathBuf,
    /// Exported function names, in emission order
    pub exports: Vec<String>,
    pub bytes_written: usize,
}
