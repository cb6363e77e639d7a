//! HTTP-based OpenAPI document loader

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::parser::OpenApiParser;
use crate::generation::{ApiDescription, GenerationError, OpenApiLoader};

/// Loads OpenAPI documents from HTTP/HTTPS URLs
pub struct HttpOpenApiLoader {
    client: Client,
}

impl HttpOpenApiLoader {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to a default HTTP client: {e}");
                Client::new()
            });

        Self { client }
    }
}

impl Default for HttpOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenApiLoader for HttpOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiDescription, GenerationError> {
        if !super::is_remote(source) {
            return Err(GenerationError::LoadError(format!(
                "HttpOpenApiLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self.client.get(source).send().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to fetch OpenAPI document from {source}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::LoadError(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let content = response.text().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read response body: {e}"))
        })?;

        let document = super::parse_document(&content, source, Some(&content_type))?;
        OpenApiParser::new(document).parse().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SPEC_JSON: &str = r#"{
        "openapi": "3.0.2",
        "info": { "title": "Test API", "version": "1.0.0" },
        "servers": [{ "url": "https://api.example.com" }],
        "paths": { "/ping": { "get": { "operationId": "getPing" } } }
    }"#;

    #[tokio::test]
    async fn test_http_loader_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/openapi.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(SPEC_JSON)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let loader = HttpOpenApiLoader::new();
        let url = format!("{}/openapi.json", mock_server.uri());
        let spec = loader.load(&url).await.unwrap();

        assert_eq!(spec.info.title, "Test API");
        assert_eq!(spec.operations[0].id, "getPing");
    }

    #[tokio::test]
    async fn test_http_loader_yaml() {
        let mock_server = MockServer::start().await;

        let spec_yaml = r#"openapi: 3.0.2
info:
  title: Test API
  version: 1.0.0
servers:
  - url: https://api.example.com
paths: {}"#;

        Mock::given(method("GET"))
            .and(path("/openapi"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(spec_yaml)
                    .insert_header("content-type", "application/x-yaml"),
            )
            .mount(&mock_server)
            .await;

        let loader = HttpOpenApiLoader::new();
        let url = format!("{}/openapi", mock_server.uri());
        let spec = loader.load(&url).await.unwrap();

        assert_eq!(spec.info.version, "1.0.0");
        assert!(spec.operations.is_empty());
    }

    #[tokio::test]
    async fn test_http_loader_404() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/notfound"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let loader = HttpOpenApiLoader::new();
        let url = format!("{}/notfound", mock_server.uri());

        match loader.load(&url).await.unwrap_err() {
            GenerationError::LoadError(msg) => assert!(msg.contains("HTTP 404")),
            other => panic!("Expected LoadError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_loader_non_http_url() {
        let loader = HttpOpenApiLoader::new();

        match loader.load("file:///path/to/spec.yaml").await.unwrap_err() {
            GenerationError::LoadError(msg) => assert!(msg.contains("only handles HTTP")),
            other => panic!("Expected LoadError, got {other:?}"),
        }
    }
}
