//! File-based OpenAPI document loader
//!
//! This loader handles only file I/O. The actual normalization is done by the OpenApiParser.

use async_trait::async_trait;
use tokio::fs;

use super::parser::OpenApiParser;
use crate::generation::{ApiDescription, GenerationError, OpenApiLoader};

/// Loads OpenAPI documents from local files
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiDescription, GenerationError> {
        let content = fs::read_to_string(source).await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read {source}: {e}"))
        })?;

        let document = super::parse_document(&content, source, None)?;
        OpenApiParser::new(document).parse().await
    }
}

impl Default for FileOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}
