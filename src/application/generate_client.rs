//! Use case for generating client modules

use crate::application::{
    ApplicationError, GenerateClientRequest, GenerateClientResponse, OutputService,
};
use crate::generation::{Artifact, ClientModule, GenerationOrchestrator, OpenApiLoader};
use std::sync::Arc;

/// Use case for generating client modules
pub struct GenerateClientUseCase {
    openapi_loader: Arc<dyn OpenApiLoader>,
    generation_orchestrator: Arc<GenerationOrchestrator>,
    output_service: Arc<dyn OutputService>,
}

impl GenerateClientUseCase {
    pub fn new(
        openapi_loader: Arc<dyn OpenApiLoader>,
        generation_orchestrator: Arc<GenerationOrchestrator>,
        output_service: Arc<dyn OutputService>,
    ) -> Self {
        Self {
            openapi_loader,
            generation_orchestrator,
            output_service,
        }
    }

    /// Load, compile, emit and write the client module
    pub async fn execute(
        &self,
        request: GenerateClientRequest,
    ) -> Result<GenerateClientResponse, ApplicationError> {
        // 1. Validate request
        request.validate()?;

        // 2. Load and normalize the API description
        let description = self.openapi_loader.load(&request.schema_path).await?;
        tracing::info!(
            "Loaded {} v{} with {} operations",
            description.info.title,
            description.info.version,
            description.operations.len()
        );

        // 3. Generate code
        let result = self
            .generation_orchestrator
            .generate(&description, request.sdk_version.as_deref())?;

        // 4. Write the module
        let bytes_written = result.content.len();
        let artifact = Artifact {
            path: request.output_path.clone(),
            content: result.content,
        };
        self.output_service.write_artifacts(&[artifact]).await?;

        Ok(GenerateClientResponse {
            output_path: request.output_path,
            exports: result
                .module
                .exports()
                .into_iter()
                .map(String::from)
                .collect(),
            bytes_written,
        })
    }

    /// Load and compile without writing anything
    pub async fn inspect(
        &self,
        schema_path: &str,
        sdk_version: Option<&str>,
    ) -> Result<ClientModule, ApplicationError> {
        let description = self.openapi_loader.load(schema_path).await?;
        Ok(self
            .generation_orchestrator
            .assemble(&description, sdk_version)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{
        ApiDescription, ApiInfo, CamelCaseNamer, GenerationError, HttpMethod, ModuleRenderer,
        Operation, Server,
    };
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_execute_success() {
        let output_service = Arc::new(MockOutputService::default());
        let use_case = GenerateClientUseCase::new(
            Arc::new(MockLoader),
            Arc::new(create_orchestrator()),
            output_service.clone(),
        );

        let request = GenerateClientRequest {
            schema_path: "openapi.json".to_string(),
            output_path: PathBuf::from("/output/index.js"),
            sdk_version: Some("2.0.0".to_string()),
        };

        let response = use_case.execute(request).await.unwrap();
        assert_eq!(response.exports, vec!["getPing".to_string()]);
        assert_eq!(response.output_path, PathBuf::from("/output/index.js"));
        assert_eq!(response.bytes_written, "getPing@2.0.0".len());

        let written = output_service.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, PathBuf::from("/output/index.js"));
        assert_eq!(written[0].1, "getPing@2.0.0");
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_request() {
        let output_service = Arc::new(MockOutputService::default());
        let use_case = GenerateClientUseCase::new(
            Arc::new(MockLoader),
            Arc::new(create_orchestrator()),
            output_service.clone(),
        );

        let request = GenerateClientRequest {
            schema_path: String::new(),
            output_path: PathBuf::from("/output/index.js"),
            sdk_version: None,
        };

        let err = use_case.execute(request).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert!(output_service.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inspect_does_not_write() {
        let output_service = Arc::new(MockOutputService::default());
        let use_case = GenerateClientUseCase::new(
            Arc::new(MockLoader),
            Arc::new(create_orchestrator()),
            output_service.clone(),
        );

        let module = use_case.inspect("openapi.json", None).await.unwrap();
        assert_eq!(module.exports(), vec!["getPing"]);
        assert!(output_service.written.lock().unwrap().is_empty());
    }

    fn create_orchestrator() -> GenerationOrchestrator {
        GenerationOrchestrator::new(Arc::new(CamelCaseNamer), Arc::new(MockRenderer))
    }

    // Mock implementations
    struct MockLoader;

    #[async_trait::async_trait]
    impl OpenApiLoader for MockLoader {
        async fn load(&self, _source: &str) -> Result<ApiDescription, GenerationError> {
            Ok(ApiDescription {
                info: ApiInfo {
                    title: "Mock".to_string(),
                    version: "1.0.0".to_string(),
                    description: None,
                },
                servers: vec![Server {
                    url: "http://localhost".to_string(),
                    description: None,
                }],
                operations: vec![Operation {
                    id: "getPing".to_string(),
                    method: HttpMethod::Get,
                    path: "/ping".to_string(),
                    summary: None,
                    description: None,
                    parameters: vec![],
                    request_body: None,
                }],
            })
        }
    }

    /// Renders the exports and the SDK version header value
    struct MockRenderer;

    impl ModuleRenderer for MockRenderer {
        fn render(&self, module: &ClientModule) -> Result<String, GenerationError> {
            let sdk_version = module.operations[0]
                .spec
                .header_bindings
                .iter()
                .find(|h| h.key == crate::generation::SDK_VERSION_HEADER)
                .map(|h| match &h.source {
                    crate::generation::ValueSource::Constant { value } => value.clone(),
                    crate::generation::ValueSource::Argument { identifier } => identifier.clone(),
                })
                .unwrap_or_default();
            Ok(format!("{}@{sdk_version}", module.exports().join(",")))
        }
    }

    #[derive(Default)]
    struct MockOutputService {
        written: Mutex<Vec<(PathBuf, String)>>,
    }

    #[async_trait::async_trait]
    impl OutputService for MockOutputService {
        async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), ApplicationError> {
            let mut written = self.written.lock().unwrap();
            for artifact in artifacts {
                written.push((artifact.path.clone(), artifact.content.clone()));
            }
            Ok(())
        }

        async fn ensure_directory(&self, _path: &Path) -> Result<(), ApplicationError> {
            Ok(())
        }
    }
}
