//! Render context handed to the template engine

use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Variables available to a template
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub data: JsonValue,
    pub variables: HashMap<String, JsonValue>,
}

impl RenderContext {
    /// Create a new render context
    pub fn new() -> Self {
        Self {
            data: JsonValue::Object(serde_json::Map::new()),
            variables: HashMap::new(),
        }
    }

    /// Add a variable to the render context
    pub fn add_variable(&mut self, key: &str, value: JsonValue) {
        self.variables.insert(key.to_string(), value.clone());

        if let Some(obj) = self.data.as_object_mut() {
            obj.insert(key.to_string(), value);
        }
    }

    /// Check if a variable exists
    pub fn has_variable(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Convert into a Tera context
    pub fn to_tera_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for (key, value) in &self.variables {
            context.insert(key.as_str(), value);
        }
        context
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
