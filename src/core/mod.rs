//! Ambient configuration shared by the CLI and library callers

pub mod config;
pub mod error;

pub use config::Config;
pub use error::Error;
