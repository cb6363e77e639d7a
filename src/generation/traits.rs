//! Port interfaces for the generation domain

use crate::generation::{ApiDescription, ClientModule, GenerationError, utils};
use async_trait::async_trait;

/// Turns declared parameter names into identifiers of the target language.
///
/// Implementations must be deterministic and stateless. They are not required
/// to produce unique identifiers; the compiler rejects collisions.
pub trait IdentifierNamer: Send + Sync {
    fn identifier(&self, name: &str) -> String;
}

/// camelCase JavaScript identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseNamer;

impl IdentifierNamer for CamelCaseNamer {
    fn identifier(&self, name: &str) -> String {
        utils::to_js_identifier(name)
    }
}

/// Emits the source text of an assembled client module
pub trait ModuleRenderer: Send + Sync {
    fn render(&self, module: &ClientModule) -> Result<String, GenerationError>;
}

/// Loads and normalizes OpenAPI specifications
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load and normalize an OpenAPI document from a source
    async fn load(&self, source: &str) -> Result<ApiDescription, GenerationError>;
}
