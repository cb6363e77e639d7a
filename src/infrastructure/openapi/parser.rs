//! OpenAPI document normalizer
//!
//! Flattens a raw OpenAPI 3 document into the [`ApiDescription`] the compiler
//! consumes:
//! - Local reference resolution ($ref)
//! - Path-level and operation-level parameter merging
//! - Type descriptors, including `oneOf` unions
//! - The `ordered` flag on query parameters

use serde_json::Value as JsonValue;

use crate::generation::utils::to_camel_case;
use crate::generation::{
    ApiDescription, ApiInfo, GenerationError, HttpMethod, Operation, Parameter,
    ParameterLocation, RequestBody, Server, TypeDescriptor,
};

/// OpenAPI document parser
pub struct OpenApiParser {
    /// The raw JSON value of the OpenAPI document
    pub json: JsonValue,
}

impl OpenApiParser {
    /// Create a new parser from JSON content
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }

    /// Parse the document into the normalized description
    pub async fn parse(&self) -> Result<ApiDescription, GenerationError> {
        let info_value = self
            .json
            .get("info")
            .ok_or_else(|| GenerationError::spec("Missing 'info' object"))?;

        let info = ApiInfo {
            title: self.title().unwrap_or_default().to_string(),
            version: self
                .version()
                .ok_or_else(|| GenerationError::spec("Missing info.version"))?
                .to_string(),
            description: info_value
                .get("description")
                .and_then(JsonValue::as_str)
                .map(String::from),
        };

        let servers: Vec<Server> = self
            .json
            .get("servers")
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|s| {
                        Some(Server {
                            url: s.get("url").and_then(JsonValue::as_str)?.to_string(),
                            description: s
                                .get("description")
                                .and_then(JsonValue::as_str)
                                .map(String::from),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        if servers.is_empty() {
            return Err(GenerationError::spec(
                "Missing 'servers': at least one server URL is required",
            ));
        }

        let operations = self.parse_operations().await?;
        tracing::debug!("OpenAPI parser found {} operations", operations.len());

        Ok(ApiDescription {
            info,
            servers,
            operations,
        })
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// Walk paths in document order, methods in [`HttpMethod::all`] order
    pub async fn parse_operations(&self) -> Result<Vec<Operation>, GenerationError> {
        let paths = self
            .json
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| GenerationError::spec("Missing 'paths' object"))?;

        paths
            .iter()
            .flat_map(|(path, path_item)| {
                HttpMethod::all().iter().filter_map(move |method| {
                    path_item
                        .get(method.as_key())
                        .and_then(JsonValue::as_object)
                        .map(|method_item| (path, *method, path_item, method_item))
                })
            })
            .map(|(path, method, path_item, method_item)| {
                self.build_operation(path, method, path_item, method_item)
            })
            .collect()
    }

    fn build_operation(
        &self,
        path: &str,
        method: HttpMethod,
        path_item: &JsonValue,
        method_item: &serde_json::Map<String, JsonValue>,
    ) -> Result<Operation, GenerationError> {
        let operation_id = method_item
            .get("operationId")
            .and_then(JsonValue::as_str)
            .map(String::from)
            .unwrap_or_else(|| {
                let fallback = to_camel_case(&format!("{} {path}", method.as_key()));
                tracing::warn!("{method} {path} has no operationId, using `{fallback}`");
                fallback
            });

        let summary = method_item
            .get("summary")
            .and_then(JsonValue::as_str)
            .map(String::from);
        let description = method_item
            .get("description")
            .and_then(JsonValue::as_str)
            .map(String::from);

        // Operation-level entries override path-level ones with the same name and location
        let mut parameters = self.extract_parameters(path_item.get("parameters"))?;
        for param in self.extract_parameters(method_item.get("parameters"))? {
            match parameters
                .iter_mut()
                .find(|p| p.name == param.name && p.location.as_str() == param.location.as_str())
            {
                Some(existing) => *existing = param,
                None => parameters.push(param),
            }
        }

        let request_body = method_item
            .get("requestBody")
            .map(|rb| self.parse_request_body(rb))
            .transpose()?;

        Ok(Operation {
            id: operation_id,
            method,
            path: path.to_string(),
            summary,
            description,
            parameters,
            request_body,
        })
    }

    /// Extracts parameters from a `parameters` array, resolving any $ref references
    fn extract_parameters(
        &self,
        parameters: Option<&JsonValue>,
    ) -> Result<Vec<Parameter>, GenerationError> {
        let Some(entries) = parameters.and_then(JsonValue::as_array) else {
            return Ok(Vec::new());
        };

        let mut parsed = Vec::with_capacity(entries.len());
        for entry in entries {
            let param = match entry.get("$ref").and_then(JsonValue::as_str) {
                Some(ref_str) => self.resolve_ref(ref_str)?,
                None => entry.clone(),
            };
            if let Some(param) = self.parse_parameter(&param)? {
                parsed.push(param);
            }
        }
        Ok(parsed)
    }

    /// Parse a single parameter. Cookie parameters yield `None`.
    fn parse_parameter(&self, param: &JsonValue) -> Result<Option<Parameter>, GenerationError> {
        let name = param
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| GenerationError::spec("Parameter missing name"))?
            .to_string();

        let ordered = param
            .get("ordered")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);

        let location = match param.get("in").and_then(JsonValue::as_str) {
            Some("path") => ParameterLocation::Path,
            Some("query") => ParameterLocation::Query { ordered },
            Some("header") => ParameterLocation::Header,
            Some("cookie") => {
                tracing::warn!("Skipping cookie parameter `{name}`");
                return Ok(None);
            }
            other => {
                return Err(GenerationError::spec(format!(
                    "Invalid location {other:?} for parameter `{name}`"
                )));
            }
        };

        let required = param
            .get("required")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);
        let schema = match param.get("schema") {
            Some(schema) => self.type_descriptor(schema)?,
            // Swagger 2 style parameters carry the type inline
            None => param
                .get("type")
                .and_then(JsonValue::as_str)
                .map(|t| TypeDescriptor::Single(t.to_string()))
                .unwrap_or(TypeDescriptor::Unspecified),
        };
        let description = param
            .get("description")
            .and_then(JsonValue::as_str)
            .map(String::from);

        Ok(Some(Parameter {
            name,
            location,
            required,
            schema,
            description,
        }))
    }

    /// Derive the documented type of a schema
    fn type_descriptor(&self, schema: &JsonValue) -> Result<TypeDescriptor, GenerationError> {
        self.describe_schema(schema, &mut Vec::new())
    }

    /// `visiting` holds the chain of references currently being resolved
    fn describe_schema(
        &self,
        schema: &JsonValue,
        visiting: &mut Vec<String>,
    ) -> Result<TypeDescriptor, GenerationError> {
        if let Some(ref_str) = schema.get("$ref").and_then(JsonValue::as_str) {
            if visiting.iter().any(|seen| seen == ref_str) {
                visiting.push(ref_str.to_string());
                return Err(GenerationError::spec(format!(
                    "Circular reference: {}",
                    visiting.join(" -> ")
                )));
            }
            let resolved = self.resolve_ref(ref_str)?;
            visiting.push(ref_str.to_string());
            let descriptor = self.describe_schema(&resolved, visiting);
            visiting.pop();
            return descriptor;
        }

        if let Some(variants) = schema.get("oneOf").and_then(JsonValue::as_array) {
            let mut names: Vec<String> = Vec::new();
            for variant in variants {
                let listing = match self.describe_schema(variant, visiting)? {
                    TypeDescriptor::Single(name) => vec![name],
                    TypeDescriptor::Union(names) => names,
                    TypeDescriptor::Unspecified => continue,
                };
                for name in listing {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
            return Ok(match names.len() {
                0 => TypeDescriptor::Unspecified,
                1 => TypeDescriptor::Single(names.remove(0)),
                _ => TypeDescriptor::Union(names),
            });
        }

        Ok(schema
            .get("type")
            .and_then(JsonValue::as_str)
            .map(|t| TypeDescriptor::Single(t.to_string()))
            .unwrap_or(TypeDescriptor::Unspecified))
    }

    /// Parse a request body
    fn parse_request_body(&self, body: &JsonValue) -> Result<RequestBody, GenerationError> {
        let resolved_body = match body.get("$ref").and_then(JsonValue::as_str) {
            Some(ref_str) => self.resolve_ref(ref_str)?,
            None => body.clone(),
        };

        Ok(RequestBody {
            required: resolved_body
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            description: resolved_body
                .get("description")
                .and_then(JsonValue::as_str)
                .map(String::from),
        })
    }

    /// Resolve a $ref reference
    fn resolve_ref(&self, ref_str: &str) -> Result<JsonValue, GenerationError> {
        // Handle JSON pointer references (e.g., "#/components/parameters/Limit")
        if let Some(pointer) = ref_str.strip_prefix('#') {
            self.json
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| GenerationError::spec(format!("Unable to resolve reference: {ref_str}")))
        } else {
            Err(GenerationError::spec(format!(
                "External references not supported: {ref_str}"
            )))
        }
    }
}
