//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::{ApplicationError, OutputService};
use crate::generation::Artifact;

/// Output service that writes artifacts to the filesystem
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), ApplicationError> {
        for artifact in artifacts {
            if let Some(parent) = artifact.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.ensure_directory(parent).await?;
            }

            let mut file = fs::File::create(&artifact.path).await.map_err(|e| {
                ApplicationError::OutputError(format!(
                    "Failed to create file {}: {e}",
                    artifact.path.display()
                ))
            })?;

            file.write_all(artifact.content.as_bytes())
                .await
                .map_err(|e| {
                    ApplicationError::OutputError(format!(
                        "Failed to write file {}: {e}",
                        artifact.path.display()
                    ))
                })?;

            file.flush().await.map_err(|e| {
                ApplicationError::OutputError(format!(
                    "Failed to flush file {}: {e}",
                    artifact.path.display()
                ))
            })?;

            tracing::debug!(
                "Wrote {} ({} bytes)",
                artifact.path.display(),
                artifact.content.len()
            );
        }

        Ok(())
    }

    async fn ensure_directory(&self, path: &Path) -> Result<(), ApplicationError> {
        fs::create_dir_all(path).await.map_err(|e| {
            ApplicationError::OutputError(format!(
                "Failed to create directory {}: {e}",
                path.display()
            ))
        })
    }
}
