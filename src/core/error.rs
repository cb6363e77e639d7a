//! Error type for loading generator configuration.
//!
//! # Examples
//!
//! ```
//! use sdkgen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("output path is missing"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration error
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
