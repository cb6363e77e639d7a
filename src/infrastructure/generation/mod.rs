//! Generation infrastructure implementations

pub mod tera_renderer;

pub use tera_renderer::TeraModuleRenderer;
