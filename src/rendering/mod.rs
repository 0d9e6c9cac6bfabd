//! Response-template rendering against the committed context.

pub mod renderer;

pub use renderer::Renderer;
