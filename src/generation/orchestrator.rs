//! Generation orchestration - coordinates the generation workflow

use crate::generation::{
    ApiDescription, ClientModule, GenerationError, GenerationResult, IdentifierNamer,
    ModuleAssembler, ModuleRenderer, OperationCompiler,
};
use std::sync::Arc;

/// Orchestrates the code generation workflow
pub struct GenerationOrchestrator {
    namer: Arc<dyn IdentifierNamer>,
    renderer: Arc<dyn ModuleRenderer>,
}

impl GenerationOrchestrator {
    /// Create a new generation orchestrator
    pub fn new(namer: Arc<dyn IdentifierNamer>, renderer: Arc<dyn ModuleRenderer>) -> Self {
        Self { namer, renderer }
    }

    /// Validate, compile and assemble without emitting source text
    pub fn assemble(
        &self,
        description: &ApiDescription,
        sdk_version: Option<&str>,
    ) -> Result<ClientModule, GenerationError> {
        // 1. Validate description
        let base_url = description
            .base_url()
            .ok_or_else(|| GenerationError::spec("API description declares no servers"))?;

        tracing::debug!(
            "Orchestrator starting generation with {} operations",
            description.operations.len()
        );

        // 2. Compile every operation
        let compiler =
            OperationCompiler::new(self.namer.as_ref(), &description.info, base_url, sdk_version);
        let compiled = description
            .operations
            .iter()
            .map(|operation| compiler.compile(operation))
            .collect::<Result<Vec<_>, _>>()?;

        // 3. Assemble the module
        ModuleAssembler::assemble(&description.info, base_url, compiled)
    }

    /// Execute the generation workflow.
    ///
    /// Any error aborts the whole run; no partial module is produced.
    pub fn generate(
        &self,
        description: &ApiDescription,
        sdk_version: Option<&str>,
    ) -> Result<GenerationResult, GenerationError> {
        let module = self.assemble(description, sdk_version)?;

        // 4. Emit source text
        let content = self.renderer.render(&module)?;

        tracing::debug!(
            "Rendered client module {} v{} ({} bytes)",
            module.title,
            module.version,
            content.len()
        );

        Ok(GenerationResult { module, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{ApiInfo, CamelCaseNamer, HttpMethod, Operation, Server};

    struct ExportsRenderer;

    impl ModuleRenderer for ExportsRenderer {
        fn render(&self, module: &ClientModule) -> Result<String, GenerationError> {
            Ok(module.exports().join(","))
        }
    }

    fn description(servers: Vec<Server>) -> ApiDescription {
        ApiDescription {
            info: ApiInfo {
                title: "Test".to_string(),
                version: "1.0.0".to_string(),
                description: None,
            },
            servers,
            operations: vec![Operation {
                id: "getPing".to_string(),
                method: HttpMethod::Get,
                path: "/ping".to_string(),
                summary: None,
                description: None,
                parameters: vec![],
                request_body: None,
            }],
        }
    }

    fn orchestrator() -> GenerationOrchestrator {
        GenerationOrchestrator::new(Arc::new(CamelCaseNamer), Arc::new(ExportsRenderer))
    }

    #[test]
    fn test_generation_workflow() {
        let result = orchestrator()
            .generate(
                &description(vec![Server {
                    url: "http://localhost/v1".to_string(),
                    description: None,
                }]),
                None,
            )
            .unwrap();
        assert_eq!(result.content, "getPing");
        assert_eq!(result.module.base_url, "http://localhost/v1");
    }

    #[test]
    fn test_generation_requires_servers() {
        let err = orchestrator().generate(&description(vec![]), None).unwrap_err();
        assert!(matches!(err, GenerationError::SpecError(_)));
    }

    #[test]
    fn test_first_server_wins() {
        let result = orchestrator()
            .generate(
                &description(vec![
                    Server {
                        url: "https://primary".to_string(),
                        description: None,
                    },
                    Server {
                        url: "https://secondary".to_string(),
                        description: None,
                    },
                ]),
                None,
            )
            .unwrap();
        assert_eq!(result.module.operations[0].base_url, "https://primary");
    }

    #[test]
    fn test_assemble_skips_rendering() {
        let module = orchestrator()
            .assemble(
                &description(vec![Server {
                    url: "http://localhost".to_string(),
                    description: None,
                }]),
                Some("1.0.0"),
            )
            .unwrap();
        assert_eq!(module.exports(), vec!["getPing"]);
    }
}
