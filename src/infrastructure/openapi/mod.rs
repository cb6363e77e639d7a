//! OpenAPI loading implementations

pub mod composite_loader;
pub mod file_loader;
pub mod http_loader;
pub mod parser;

pub use composite_loader::CompositeOpenApiLoader;
pub use file_loader::FileOpenApiLoader;
pub use http_loader::HttpOpenApiLoader;
pub use parser::OpenApiParser;

use serde_json::Value as JsonValue;
use url::Url;

use crate::generation::GenerationError;

/// True for `http://` and `https://` sources
pub(crate) fn is_remote(source: &str) -> bool {
    Url::parse(source)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Parse raw document text as JSON or YAML.
///
/// The content type (when known) and the source extension pick the format;
/// otherwise JSON is tried first, then YAML.
pub(crate) fn parse_document(
    content: &str,
    source: &str,
    content_type: Option<&str>,
) -> Result<JsonValue, GenerationError> {
    let content_type = content_type.unwrap_or("");
    // Query strings must not hide the extension of a URL
    let path = source.split(['?', '#']).next().unwrap_or(source);

    if content_type.contains("json") || path.ends_with(".json") {
        serde_json::from_str(content).map_err(GenerationError::SerializationError)
    } else if content_type.contains("yaml") || path.ends_with(".yaml") || path.ends_with(".yml")
    {
        serde_yaml::from_str(content)
            .map_err(|e| GenerationError::LoadError(format!("Failed to parse YAML: {e}")))
    } else {
        serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| {
                GenerationError::LoadError(format!("Failed to parse OpenAPI document: {e}"))
            })
    }
}
