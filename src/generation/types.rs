//! Normalized API description consumed by the operation compiler

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Header names the compiler owns. Never exposed as call-time arguments.
pub const RESERVED_HEADERS: [&str; 3] = ["X-API-Version", "X-SDK-Version", "X-APP-Version"];

/// Header carrying `info.version`
pub const API_VERSION_HEADER: &str = "X-API-Version";

/// Header carrying the SDK version handed to the generator
pub const SDK_VERSION_HEADER: &str = "X-SDK-Version";

/// Returns true when `name` is one of the reserved version headers.
///
/// Header names are case-insensitive on the wire, so the match is too.
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_HEADERS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// HTTP methods an operation can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// All methods, in the order path items are walked
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
            HttpMethod::Patch,
            HttpMethod::Trace,
        ]
    }

    /// Key used for this method inside an OpenAPI path item
    pub fn as_key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key().to_uppercase())
    }
}

impl FromStr for HttpMethod {
    type Err = crate::generation::GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::all()
            .iter()
            .copied()
            .find(|method| method.as_key().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                crate::generation::GenerationError::SpecError(format!(
                    "Unsupported HTTP method: {s}"
                ))
            })
    }
}

/// The whole API, already flattened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDescription {
    pub info: ApiInfo,
    pub servers: Vec<Server>,
    pub operations: Vec<Operation>,
}

impl ApiDescription {
    /// Base URL every generated function targets
    pub fn base_url(&self) -> Option<&str> {
        self.servers.first().map(|server| server.url.as_str())
    }
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

/// Server definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
}

/// One addressable API action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Exported function name
    #[serde(rename = "operationId")]
    pub id: String,
    pub method: HttpMethod,
    /// Path template, e.g. "/pets/{petId}"
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
}

/// Operation parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: TypeDescriptor,
    pub description: Option<String>,
}

impl Parameter {
    pub fn is_reserved(&self) -> bool {
        is_reserved_name(&self.name)
    }

    /// Whether a query value must be sorted before it is sent
    pub fn is_ordered(&self) -> bool {
        matches!(self.location, ParameterLocation::Query { ordered: true })
    }
}

/// Where a parameter travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "in", rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query {
        /// Multi-valued, order-insensitive collection
        #[serde(default)]
        ordered: bool,
    },
    Header,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query { .. } => "query",
            ParameterLocation::Header => "header",
        }
    }
}

/// Declared type of a parameter, possibly a union of primitives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    Single(String),
    Union(Vec<String>),
    Unspecified,
}

impl TypeDescriptor {
    /// Type listing used in generated documentation, e.g. `string|number`
    pub fn listing(&self) -> String {
        match self {
            TypeDescriptor::Single(name) => name.clone(),
            TypeDescriptor::Union(names) => names.join("|"),
            TypeDescriptor::Unspecified => "*".to_string(),
        }
    }
}

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    pub required: bool,
    pub description: Option<String>,
}

/// Generated artifact
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

/// Result of generation
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub module: crate::generation::ClientModule,
    pub content: String,
}
