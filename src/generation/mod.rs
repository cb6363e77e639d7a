//! Generation domain module - compiles an API description into a client module
//!
//! The workflow is a pure, synchronous batch transformation: every operation
//! is compiled into a [`RequestSpec`], the compiled operations are assembled
//! into a [`ClientModule`], and a [`ModuleRenderer`] emits the source text.

pub mod assembler;
pub mod compiler;
pub mod context;
pub mod errors;
pub mod invocation;
pub mod orchestrator;
pub mod request;
pub mod sanitizers;
pub mod traits;
pub mod types;
pub mod utils;

pub use assembler::*;
pub use compiler::*;
pub use context::*;
pub use errors::*;
pub use invocation::*;
pub use orchestrator::*;
pub use request::*;
pub use traits::*;
pub use types::*;
