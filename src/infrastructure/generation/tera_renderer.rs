//! Tera-based module renderer
//!
//! Every value spliced into the JavaScript source is turned into a literal
//! (or a checked identifier) here, so the template only carries layout.

use serde::Serialize;
use serde_json::json;
use tera::Tera;

use crate::generation::sanitizers::sanitize_doc_comment;
use crate::generation::{
    CallSignature, ClientModule, CompiledOperation, GenerationError, ModuleRenderer, PathSegment,
    RenderContext, ValueSource,
};

const TEMPLATE_NAME: &str = "client.js";
const CLIENT_TEMPLATE: &str = include_str!("../../../templates/client.js.tera");

/// Renders a [`ClientModule`] into a CommonJS source file
pub struct TeraModuleRenderer {
    tera: Tera,
}

impl TeraModuleRenderer {
    /// Create a renderer using the embedded client template
    pub fn new() -> Result<Self, GenerationError> {
        Self::with_template(CLIENT_TEMPLATE)
    }

    /// Create a renderer from custom template text
    pub fn with_template(template: &str) -> Result<Self, GenerationError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, template)
            .map_err(|e| GenerationError::RenderError(format!("Failed to add template: {e}")))?;
        Ok(Self { tera })
    }
}

impl ModuleRenderer for TeraModuleRenderer {
    fn render(&self, module: &ClientModule) -> Result<String, GenerationError> {
        let operations = module
            .operations
            .iter()
            .map(OperationView::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut context = RenderContext::new();
        context.add_variable("description", json!(module.description));
        context.add_variable("version", json!(sanitize_doc_comment(&module.version)));
        context.add_variable("operations", serde_json::to_value(&operations)?);

        tracing::debug!("Rendering {} with {} operations", TEMPLATE_NAME, operations.len());

        self.tera
            .render(TEMPLATE_NAME, &context.to_tera_context())
            .map_err(|e| GenerationError::RenderError(format!("Failed to render template: {e}")))
    }
}

#[derive(Debug, Serialize)]
struct OperationView {
    name: String,
    summary: String,
    description: Option<String>,
    body_doc: Option<String>,
    body_label: String,
    param_docs: Vec<ParamDocView>,
    arguments: String,
    validations: Vec<ValidationView>,
    url_parts: Vec<String>,
    headers: Vec<EntryView>,
    query: Vec<EntryView>,
    base_url: String,
    method: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct ParamDocView {
    tag: String,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValidationView {
    identifier: String,
    name_literal: String,
}

#[derive(Debug, Serialize)]
struct EntryView {
    key: String,
    value: String,
}

impl TryFrom<&CompiledOperation> for OperationView {
    type Error = GenerationError;

    fn try_from(op: &CompiledOperation) -> Result<Self, Self::Error> {
        let spec = &op.spec;

        let arguments = match &op.signature {
            CallSignature::Placeholder => "_".to_string(),
            CallSignature::Structured { fields } => {
                let fields: String = fields.iter().map(|f| format!("\n  {f},")).collect();
                format!("{{{fields}\n}} = {{}}")
            }
        };

        let param_docs = op
            .doc
            .parameters
            .iter()
            .map(|param| {
                let label = if param.required {
                    format!("parameters.{}", param.identifier)
                } else {
                    format!("[parameters.{}]", param.identifier)
                };
                ParamDocView {
                    tag: format!("{{{}}} {label}", param.type_listing),
                    description: param.description.clone(),
                }
            })
            .collect();

        let validations = spec
            .validations
            .iter()
            .map(|v| {
                Ok(ValidationView {
                    identifier: v.identifier.clone(),
                    name_literal: js_string(&v.identifier)?,
                })
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        let url_parts = spec
            .path_segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal { value } => js_string(value),
                PathSegment::Parameter { identifier, .. } => Ok(identifier.clone()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let headers = spec
            .header_bindings
            .iter()
            .map(|binding| {
                Ok(EntryView {
                    key: js_string(&binding.key)?,
                    value: value_expression(&binding.source)?,
                })
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        let query = spec
            .query_bindings
            .iter()
            .map(|binding| {
                let value = value_expression(&binding.source)?;
                Ok(EntryView {
                    key: js_string(&binding.key)?,
                    value: if binding.ordered {
                        format!("__sortOrdered({value})")
                    } else {
                        value
                    },
                })
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        let summary = if op.doc.summary.is_empty() {
            op.operation_id.clone()
        } else {
            op.doc.summary.clone()
        };

        let body_label = match &spec.body_binding {
            Some(binding) if !binding.required => format!("[parameters.{}]", binding.identifier),
            Some(binding) => format!("parameters.{}", binding.identifier),
            None => String::new(),
        };

        Ok(Self {
            name: op.operation_id.clone(),
            summary,
            description: op.doc.description.clone(),
            body_doc: op.doc.body.clone(),
            body_label,
            param_docs,
            arguments,
            validations,
            url_parts,
            headers,
            query,
            base_url: js_string(&op.base_url)?,
            method: js_string(&spec.method.to_string())?,
            data: spec
                .body_binding
                .as_ref()
                .map(|b| b.identifier.clone())
                .unwrap_or_else(|| "undefined".to_string()),
        })
    }
}

/// A JSON string literal is a valid JavaScript string literal
fn js_string(value: &str) -> Result<String, GenerationError> {
    Ok(serde_json::to_string(value)?)
}

fn value_expression(source: &ValueSource) -> Result<String, GenerationError> {
    match source {
        ValueSource::Constant { value } => js_string(value),
        ValueSource::Argument { identifier } => Ok(identifier.clone()),
    }
}
