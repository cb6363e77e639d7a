//! Intermediate representation produced by the operation compiler
//!
//! A [`RequestSpec`] describes one HTTP request independently of the target
//! language. The renderer turns it into source text and
//! [`CompiledOperation::describe`](crate::generation::invocation) evaluates it
//! in-process.

use serde::{Deserialize, Serialize};

use crate::generation::HttpMethod;

/// One piece of the request path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathSegment {
    /// Kept verbatim, case included
    Literal { value: String },
    /// Filled from a required path argument
    Parameter { name: String, identifier: String },
}

/// Where a header or query value comes from at call time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSource {
    Constant { value: String },
    Argument { identifier: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderBinding {
    pub key: String,
    pub source: ValueSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBinding {
    pub key: String,
    pub source: ValueSource,
    pub ordered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyBinding {
    pub identifier: String,
    pub required: bool,
}

/// Requiredness check run before anything else at call time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// Name as declared in the API description
    pub parameter: String,
    pub identifier: String,
}

/// Structured description of one request, prior to text emission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path_segments: Vec<PathSegment>,
    /// Applied in order over the caller's override headers; later entries win
    pub header_bindings: Vec<HeaderBinding>,
    pub query_bindings: Vec<QueryBinding>,
    pub body_binding: Option<BodyBinding>,
    pub validations: Vec<Validation>,
}

impl RequestSpec {
    /// Path template rebuilt from the segments, e.g. `/pets/{petId}`
    pub fn path_template(&self) -> String {
        let parts: Vec<String> = self
            .path_segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal { value } => value.clone(),
                PathSegment::Parameter { identifier, .. } => format!("{{{identifier}}}"),
            })
            .collect();
        format!("/{}", parts.join("/"))
    }
}

/// Shape of the first argument of a generated function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallSignature {
    /// No parameters and no body: the first argument is ignored
    Placeholder,
    /// A single object destructured into these fields
    Structured { fields: Vec<String> },
}

/// Documentation of one call-time argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDoc {
    pub identifier: String,
    pub type_listing: String,
    pub required: bool,
    pub description: Option<String>,
}

/// Documentation carried alongside a compiled operation. No runtime behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDoc {
    pub summary: String,
    pub description: Option<String>,
    pub parameters: Vec<ParameterDoc>,
    pub body: Option<String>,
}

/// Everything the assembler needs for one exported function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledOperation {
    pub operation_id: String,
    pub base_url: String,
    pub signature: CallSignature,
    pub spec: RequestSpec,
    pub doc: OperationDoc,
}
