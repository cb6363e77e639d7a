//! In-process evaluation of a compiled operation
//!
//! [`CompiledOperation::describe`] computes the request description a
//! generated function hands to its HTTP transport for a given set of call
//! arguments. The emitted JavaScript follows the same steps in the same
//! order: validate, build path, assemble headers, assemble query, bind body,
//! then merge the caller's transport options.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use thiserror::Error;

use crate::generation::sanitizers::{Entries, assign, clean_headers, clean_query, sort_ordered};
use crate::generation::{CompiledOperation, PathSegment, ValueSource};

/// Fields of the structured first argument, keyed by identifier
pub type CallArguments = JsonMap<String, JsonValue>;

/// Errors raised by a generated function before any request is built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("Missing required parameter : {name}. Value : {value}")]
    MissingParameter { name: String, value: String },
}

/// Caller-supplied per-call options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportOptions {
    /// Lowest-priority headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<JsonMap<String, JsonValue>>,
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
    /// Replaces the generated query as a whole
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonMap<String, JsonValue>>,
    /// Anything else is handed to the transport untouched
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

/// The single request a generated function describes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescription {
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub method: String,
    pub url: String,
    pub headers: JsonMap<String, JsonValue>,
    pub query: JsonMap<String, JsonValue>,
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl CompiledOperation {
    /// Evaluate this operation against call-time arguments
    pub fn describe(
        &self,
        arguments: &CallArguments,
        options: Option<&TransportOptions>,
    ) -> Result<RequestDescription, CallError> {
        for validation in &self.spec.validations {
            match arguments.get(&validation.identifier) {
                None => return Err(missing(&validation.identifier, "undefined")),
                Some(JsonValue::Null) => return Err(missing(&validation.identifier, "null")),
                Some(_) => {}
            }
        }

        let parts: Vec<String> = self
            .spec
            .path_segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Literal { value } => value.clone(),
                PathSegment::Parameter { identifier, .. } => {
                    arguments.get(identifier).map(path_text).unwrap_or_default()
                }
            })
            .collect();

        let mut headers = Entries::new();
        if let Some(overrides) = options.and_then(|o| o.headers.as_ref()) {
            for (key, value) in overrides {
                assign(&mut headers, key, Some(value.clone()));
            }
        }
        for binding in &self.spec.header_bindings {
            assign(&mut headers, &binding.key, resolve(&binding.source, arguments));
        }

        let mut query = Entries::new();
        for binding in &self.spec.query_bindings {
            let value = resolve(&binding.source, arguments);
            let value = if binding.ordered {
                value.map(sort_ordered)
            } else {
                value
            };
            assign(&mut query, &binding.key, value);
        }

        let body = self
            .spec
            .body_binding
            .as_ref()
            .and_then(|binding| arguments.get(&binding.identifier).cloned());

        let mut description = RequestDescription {
            base_url: self.base_url.clone(),
            method: self.spec.method.to_string(),
            url: format!("/{}", parts.join("/")),
            headers: clean_headers(headers),
            query: clean_query(query),
            body,
            extra: JsonMap::new(),
        };

        if let Some(options) = options {
            if let Some(base_url) = &options.base_url {
                description.base_url = base_url.clone();
            }
            if let Some(method) = &options.method {
                description.method = method.clone();
            }
            if let Some(url) = &options.url {
                description.url = url.clone();
            }
            if let Some(body) = &options.body {
                description.body = Some(body.clone());
            }
            if let Some(params) = &options.params {
                description.query = params.clone();
            }
            description.extra = options.extra.clone();
        }

        Ok(description)
    }
}

fn missing(name: &str, value: &str) -> CallError {
    CallError::MissingParameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn resolve(source: &ValueSource, arguments: &CallArguments) -> Option<JsonValue> {
    match source {
        ValueSource::Constant { value } => Some(JsonValue::String(value.clone())),
        ValueSource::Argument { identifier } => arguments.get(identifier).cloned(),
    }
}

/// Text a value takes once joined into the URL path
fn path_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Array(items) => items.iter().map(path_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
