//! Generator configuration file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::core::error::{Error, Result};

/// Settings read from a YAML file. Command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path or URL of the OpenAPI document
    #[serde(default)]
    pub schema_path: Option<String>,
    /// File the generated module is written to
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Value of the `X-SDK-Version` header
    #[serde(default)]
    pub sdk_version: Option<String>,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or contains invalid YAML.
    pub async fn load(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "Reading configuration");

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::config(format!("Failed to read config at {}: {e}", path.display()))
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            Error::config(format!("Invalid YAML in config at {}: {e}", path.display()))
        })?;

        Ok(config)
    }

    /// Overlay explicitly provided values on top of this configuration
    pub fn merge(self, overrides: Config) -> Self {
        Self {
            schema_path: overrides.schema_path.or(self.schema_path),
            output: overrides.output.or(self.output),
            sdk_version: overrides.sdk_version.or(self.sdk_version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_config_from_valid_yaml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("sdkgen.yml");
        fs::write(
            &config_path,
            "schema_path: openapi.json\noutput: sdk/index.js\nsdk_version: \"1.2.0\"\n",
        )
        .await
        .unwrap();

        let config = Config::load(&config_path).await.unwrap();
        assert_eq!(config.schema_path.as_deref(), Some("openapi.json"));
        assert_eq!(config.output, Some(PathBuf::from("sdk/index.js")));
        assert_eq!(config.sdk_version.as_deref(), Some("1.2.0"));
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        let temp_dir = tempdir().unwrap();
        let error = Config::load(&temp_dir.path().join("missing.yml"))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("Failed to read config"));
    }

    #[tokio::test]
    async fn test_load_config_rejects_unknown_fields() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("sdkgen.yml");
        fs::write(&config_path, "schema: openapi.json\n").await.unwrap();

        let error = Config::load(&config_path).await.unwrap_err();
        assert!(error.to_string().contains("Invalid YAML"));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = Config {
            schema_path: Some("file.json".to_string()),
            output: Some(PathBuf::from("file.js")),
            sdk_version: Some("1.0.0".to_string()),
        };
        let flags = Config {
            schema_path: Some("flag.json".to_string()),
            ..Config::default()
        };

        let merged = file.merge(flags);
        assert_eq!(merged.schema_path.as_deref(), Some("flag.json"));
        assert_eq!(merged.output, Some(PathBuf::from("file.js")));
        assert_eq!(merged.sdk_version.as_deref(), Some("1.0.0"));
    }
}
