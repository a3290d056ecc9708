//! Text rendering of generated C++ files.

pub mod block;
pub mod context;
pub mod header;
pub mod paths;
pub mod source;
pub(crate) mod templates;

pub use block::{BlockLine, CodeBlock};
pub use context::RenderContext;
pub use header::render_header;
pub use paths::relative_include;
pub use source::{SourceSections, render_source};
