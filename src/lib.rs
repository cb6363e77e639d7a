//! sdkgen - generate a JavaScript API client module from an OpenAPI document
//!
//! The pipeline loads and normalizes a document
//! ([`infrastructure::openapi`]), compiles every operation into a request
//! specification ([`generation::OperationCompiler`]), assembles the exported
//! module ([`generation::ModuleAssembler`]) and emits CommonJS source text
//! ([`infrastructure::generation::TeraModuleRenderer`]).
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;
