//! Composite OpenAPI loader dispatching on the source kind

use crate::generation::{ApiDescription, GenerationError, OpenApiLoader};
use async_trait::async_trait;

use super::{FileOpenApiLoader, HttpOpenApiLoader};

/// Routes URLs to the HTTP loader and everything else to the file loader
pub struct CompositeOpenApiLoader {
    http: HttpOpenApiLoader,
    file: FileOpenApiLoader,
}

impl CompositeOpenApiLoader {
    pub fn new() -> Self {
        Self {
            http: HttpOpenApiLoader::new(),
            file: FileOpenApiLoader::new(),
        }
    }
}

impl Default for CompositeOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiDescription, GenerationError> {
        if super::is_remote(source) {
            tracing::debug!("CompositeOpenApiLoader: Using HTTP loader for {source}");
            self.http.load(source).await
        } else {
            tracing::debug!("CompositeOpenApiLoader: Using file loader for {source}");
            self.file.load(source).await
        }
    }
}
