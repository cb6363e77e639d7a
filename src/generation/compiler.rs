//! Operation compiler - turns one operation record into a [`RequestSpec`]
//!
//! Compilation is pure: the same operation, API info and SDK version always
//! yield the same [`CompiledOperation`], which is what keeps regenerated
//! clients byte-identical.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::generation::sanitizers::sanitize_doc_comment;
use crate::generation::{
    API_VERSION_HEADER, ApiInfo, BodyBinding, CallSignature, CompiledOperation, GenerationError,
    HeaderBinding, IdentifierNamer, Operation, OperationDoc, Parameter, ParameterDoc,
    ParameterLocation, PathSegment, QueryBinding, RequestSpec, SDK_VERSION_HEADER, Validation,
    ValueSource,
};

/// Field of the argument object that carries the request payload
pub const BODY_ARGUMENT: &str = "body";

/// A path segment made of exactly one `{name}` placeholder
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{([^{}]+)\}$").expect("placeholder pattern is valid"));

/// Compiles operations of one API description
pub struct OperationCompiler<'a> {
    namer: &'a dyn IdentifierNamer,
    info: &'a ApiInfo,
    base_url: &'a str,
    sdk_version: Option<&'a str>,
}

/// A non-reserved parameter together with its generated identifier
struct BoundParameter<'p> {
    parameter: &'p Parameter,
    identifier: String,
}

impl<'a> OperationCompiler<'a> {
    pub fn new(
        namer: &'a dyn IdentifierNamer,
        info: &'a ApiInfo,
        base_url: &'a str,
        sdk_version: Option<&'a str>,
    ) -> Self {
        Self {
            namer,
            info,
            base_url,
            sdk_version,
        }
    }

    /// Compile a single operation
    pub fn compile(&self, operation: &Operation) -> Result<CompiledOperation, GenerationError> {
        let bound = self.bind_parameters(operation)?;

        let spec = RequestSpec {
            method: operation.method,
            path_segments: segment_path(operation, &bound)?,
            header_bindings: self.header_bindings(&bound),
            query_bindings: query_bindings(&bound),
            body_binding: operation.request_body.as_ref().map(|body| BodyBinding {
                identifier: BODY_ARGUMENT.to_string(),
                required: body.required,
            }),
            validations: bound
                .iter()
                .filter(|b| b.parameter.required)
                .map(|b| Validation {
                    parameter: b.parameter.name.clone(),
                    identifier: b.identifier.clone(),
                })
                .collect(),
        };

        let mut fields = Vec::with_capacity(bound.len() + 1);
        if spec.body_binding.is_some() {
            fields.push(BODY_ARGUMENT.to_string());
        }
        fields.extend(bound.iter().map(|b| b.identifier.clone()));
        let signature = if fields.is_empty() {
            CallSignature::Placeholder
        } else {
            CallSignature::Structured { fields }
        };

        debug!(
            operation = %operation.id,
            method = %spec.method,
            path = %spec.path_template(),
            "compiled operation"
        );

        Ok(CompiledOperation {
            operation_id: operation.id.clone(),
            base_url: self.base_url.to_string(),
            signature,
            doc: document(operation, &bound),
            spec,
        })
    }

    /// Drops reserved parameters and names the rest, rejecting collisions
    fn bind_parameters<'p>(
        &self,
        operation: &'p Operation,
    ) -> Result<Vec<BoundParameter<'p>>, GenerationError> {
        let mut taken: HashSet<String> = HashSet::new();
        if operation.request_body.is_some() {
            taken.insert(BODY_ARGUMENT.to_string());
        }

        let mut bound = Vec::with_capacity(operation.parameters.len());
        for parameter in &operation.parameters {
            if parameter.is_reserved() {
                debug!(
                    operation = %operation.id,
                    parameter = %parameter.name,
                    "skipping reserved parameter"
                );
                continue;
            }
            let identifier = self.namer.identifier(&parameter.name);
            if !taken.insert(identifier.clone()) {
                return Err(GenerationError::DuplicateIdentifier {
                    operation: operation.id.clone(),
                    identifier,
                });
            }
            bound.push(BoundParameter {
                parameter,
                identifier,
            });
        }
        Ok(bound)
    }

    fn header_bindings(&self, bound: &[BoundParameter<'_>]) -> Vec<HeaderBinding> {
        let mut bindings = vec![HeaderBinding {
            key: API_VERSION_HEADER.to_string(),
            source: ValueSource::Constant {
                value: self.info.version.clone(),
            },
        }];
        if let Some(sdk_version) = self.sdk_version {
            bindings.push(HeaderBinding {
                key: SDK_VERSION_HEADER.to_string(),
                source: ValueSource::Constant {
                    value: sdk_version.to_string(),
                },
            });
        }
        bindings.extend(
            bound
                .iter()
                .filter(|b| b.parameter.location == ParameterLocation::Header)
                .map(|b| HeaderBinding {
                    key: b.parameter.name.clone(),
                    source: ValueSource::Argument {
                        identifier: b.identifier.clone(),
                    },
                }),
        );
        bindings
    }
}

fn query_bindings(bound: &[BoundParameter<'_>]) -> Vec<QueryBinding> {
    bound
        .iter()
        .filter(|b| matches!(b.parameter.location, ParameterLocation::Query { .. }))
        .map(|b| QueryBinding {
            key: b.parameter.name.clone(),
            source: ValueSource::Argument {
                identifier: b.identifier.clone(),
            },
            ordered: b.parameter.is_ordered(),
        })
        .collect()
}

/// Splits the path template and checks it against the declared path parameters
fn segment_path(
    operation: &Operation,
    bound: &[BoundParameter<'_>],
) -> Result<Vec<PathSegment>, GenerationError> {
    let path_parameters: Vec<&BoundParameter<'_>> = bound
        .iter()
        .filter(|b| b.parameter.location == ParameterLocation::Path)
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut segments = Vec::new();

    for raw in operation.path.split('/').filter(|s| !s.is_empty()) {
        let Some(captures) = PLACEHOLDER_RE.captures(raw) else {
            segments.push(PathSegment::Literal {
                value: raw.to_string(),
            });
            continue;
        };
        let name = captures.get(1).map_or("", |m| m.as_str());

        let matching = path_parameters
            .iter()
            .find(|b| b.parameter.name == name)
            .ok_or_else(|| {
                GenerationError::path_mismatch(
                    &operation.id,
                    format!("placeholder {{{name}}} has no matching path parameter"),
                )
            })?;
        if !matching.parameter.required {
            return Err(GenerationError::path_mismatch(
                &operation.id,
                format!("path parameter {name} must be required"),
            ));
        }
        if !seen.insert(matching.parameter.name.as_str()) {
            return Err(GenerationError::path_mismatch(
                &operation.id,
                format!("placeholder {{{name}}} appears more than once"),
            ));
        }

        segments.push(PathSegment::Parameter {
            name: name.to_string(),
            identifier: matching.identifier.clone(),
        });
    }

    if let Some(orphan) = path_parameters
        .iter()
        .find(|b| !seen.contains(b.parameter.name.as_str()))
    {
        return Err(GenerationError::path_mismatch(
            &operation.id,
            format!(
                "path parameter {} has no placeholder in {}",
                orphan.parameter.name, operation.path
            ),
        ));
    }

    Ok(segments)
}

fn document(operation: &Operation, bound: &[BoundParameter<'_>]) -> OperationDoc {
    OperationDoc {
        summary: sanitize_doc_comment(operation.summary.as_deref().unwrap_or_default()),
        description: operation
            .description
            .as_deref()
            .map(sanitize_doc_comment)
            .filter(|d| !d.is_empty()),
        parameters: bound
            .iter()
            .map(|b| ParameterDoc {
                identifier: b.identifier.clone(),
                type_listing: sanitize_doc_comment(&b.parameter.schema.listing()),
                required: b.parameter.required,
                description: b
                    .parameter
                    .description
                    .as_deref()
                    .map(sanitize_doc_comment)
                    .filter(|d| !d.is_empty()),
            })
            .collect(),
        body: operation.request_body.as_ref().map(|body| {
            body.description
                .as_deref()
                .map(sanitize_doc_comment)
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "The request body".to_string())
        }),
    }
}
