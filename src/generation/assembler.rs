//! Module assembler - gathers compiled operations into one exported mapping

use std::collections::HashSet;

use serde::Serialize;

use crate::generation::sanitizers::sanitize_doc_comment;
use crate::generation::utils::is_js_identifier;
use crate::generation::{ApiInfo, CompiledOperation, GenerationError};

/// Prefix of the module-level bindings the renderer emits
pub const HELPER_PREFIX: &str = "__";

/// A client module ready for text emission
#[derive(Debug, Clone, Serialize)]
pub struct ClientModule {
    pub title: String,
    pub version: String,
    /// Module documentation, one line
    pub description: String,
    pub base_url: String,
    /// In declaration order; one exported entry each
    pub operations: Vec<CompiledOperation>,
}

impl ClientModule {
    /// Exported names, in emission order
    pub fn exports(&self) -> Vec<&str> {
        self.operations
            .iter()
            .map(|op| op.operation_id.as_str())
            .collect()
    }

    pub fn operation(&self, operation_id: &str) -> Option<&CompiledOperation> {
        self.operations
            .iter()
            .find(|op| op.operation_id == operation_id)
    }
}

pub struct ModuleAssembler;

impl ModuleAssembler {
    /// Wrap compiled operations and API metadata into a [`ClientModule`].
    ///
    /// Fails when an operationId cannot be used as an exported function name
    /// or is used twice.
    pub fn assemble(
        info: &ApiInfo,
        base_url: &str,
        operations: Vec<CompiledOperation>,
    ) -> Result<ClientModule, GenerationError> {
        let mut names = HashSet::new();
        for op in &operations {
            let name = op.operation_id.as_str();
            if !is_js_identifier(name) {
                return Err(GenerationError::spec(format!(
                    "operationId `{name}` is not a valid function name"
                )));
            }
            if name.starts_with(HELPER_PREFIX) {
                return Err(GenerationError::spec(format!(
                    "operationId `{name}` uses the reserved `{HELPER_PREFIX}` prefix"
                )));
            }
            if !names.insert(name) {
                return Err(GenerationError::spec(format!(
                    "operationId `{name}` is used by more than one operation"
                )));
            }
        }

        let description = info
            .description
            .as_deref()
            .map(sanitize_doc_comment)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| sanitize_doc_comment(&info.title));

        Ok(ClientModule {
            title: info.title.clone(),
            version: info.version.clone(),
            description,
            base_url: base_url.to_string(),
            operations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{
        CallSignature, HttpMethod, OperationDoc, RequestSpec,
    };

    fn info(description: Option<&str>) -> ApiInfo {
        ApiInfo {
            title: "Example".to_string(),
            version: "3.1.3".to_string(),
            description: description.map(String::from),
        }
    }

    fn compiled(id: &str) -> CompiledOperation {
        CompiledOperation {
            operation_id: id.to_string(),
            base_url: "http://localhost".to_string(),
            signature: CallSignature::Placeholder,
            spec: RequestSpec {
                method: HttpMethod::Get,
                path_segments: vec![],
                header_bindings: vec![],
                query_bindings: vec![],
                body_binding: None,
                validations: vec![],
            },
            doc: OperationDoc {
                summary: String::new(),
                description: None,
                parameters: vec![],
                body: None,
            },
        }
    }

    #[test]
    fn test_assemble_keeps_order() {
        let module = ModuleAssembler::assemble(
            &info(Some("A basic server")),
            "http://localhost",
            vec![compiled("getPing"), compiled("getTime")],
        )
        .unwrap();
        assert_eq!(module.exports(), vec!["getPing", "getTime"]);
        assert_eq!(module.description, "A basic server");
        assert!(module.operation("getTime").is_some());
        assert!(module.operation("getNothing").is_none());
    }

    #[test]
    fn test_description_falls_back_to_title() {
        let module = ModuleAssembler::assemble(&info(None), "http://localhost", vec![]).unwrap();
        assert_eq!(module.description, "Example");
    }

    #[test]
    fn test_duplicate_operation_ids() {
        let err = ModuleAssembler::assemble(
            &info(None),
            "http://localhost",
            vec![compiled("getPing"), compiled("getPing")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than one operation"));
    }

    #[test]
    fn test_invalid_operation_ids() {
        for id in ["get-ping", "1st", "delete", "__helpers"] {
            let result =
                ModuleAssembler::assemble(&info(None), "http://localhost", vec![compiled(id)]);
            assert!(result.is_err(), "{id} should be rejected");
        }
    }
}
