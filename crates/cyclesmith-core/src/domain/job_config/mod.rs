//! XML job configuration: tree model, `quick-xml` codec and the edit pipeline.

pub mod edit;
pub mod tree;
pub mod xml;

pub use edit::adapt_job_config;
pub use tree::{Misc, XmlDocument, XmlElement, XmlNode};
pub use xml::{parse_document, strip_blank_lines, write_document};
