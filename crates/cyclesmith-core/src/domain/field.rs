//! Field model: one branch of the input tree as seen by the generator.

use serde::Serialize;

use crate::domain::{
    naming::sanitize_identifier,
    types::{is_container_like, std_type_name},
};

/// Marker appended to the title of Monte-Carlo-only fields.
pub const MC_TITLE_MARKER: &str = "MC";

/// One input (and optionally output) variable of a cycle.
///
/// Built by a field source, tagged once by the Monte-Carlo pass and read-only
/// from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldModel {
    name: String,
    cname: String,
    typename: String,
    container_like: bool,
    pointer: bool,
    mc: bool,
    title: String,
    commented: bool,
}

impl FieldModel {
    /// Create a field from its schema name and declared type.
    ///
    /// Container-like types are accessed through a pointer; everything else
    /// is read by value.
    pub fn new(name: impl Into<String>, typename: impl Into<String>) -> Self {
        let name = name.into();
        let typename = typename.into().trim().to_string();
        let container_like = is_container_like(&typename);
        Self {
            cname: sanitize_identifier(&name),
            title: name.clone(),
            name,
            typename,
            container_like,
            pointer: container_like,
            mc: false,
            commented: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Emit every line of this field commented out.
    pub fn commented_out(mut self) -> Self {
        self.commented = true;
        self
    }

    pub fn with_pointer(mut self, pointer: bool) -> Self {
        self.pointer = pointer;
        self
    }

    /// Tag the field as only present in simulated data.
    pub fn mark_monte_carlo(&mut self) {
        if !self.mc {
            self.mc = true;
            self.title.push_str(MC_TITLE_MARKER);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cname(&self) -> &str {
        &self.cname
    }

    pub fn typename(&self) -> &str {
        &self.typename
    }

    pub fn is_container_like(&self) -> bool {
        self.container_like
    }

    pub fn is_pointer(&self) -> bool {
        self.pointer
    }

    pub fn is_mc(&self) -> bool {
        self.mc
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_commented(&self) -> bool {
        self.commented
    }

    /// `//` for commented-out fields, empty otherwise.
    pub fn comment_prefix(&self) -> &'static str {
        if self.commented { "//" } else { "" }
    }

    /// `*` for pointer-accessed fields, empty otherwise.
    pub fn indirection(&self) -> &'static str {
        if self.pointer { "*" } else { "" }
    }

    /// Name of the output slot in generated code.
    pub fn output_name(&self) -> String {
        format!("out_{}", self.cname)
    }

    /// Type used for the output slot.
    pub fn std_type_name(&self) -> String {
        std_type_name(&self.typename)
    }

    /// Member declaration for the input variable.
    pub fn declaration(&self) -> String {
        format!(
            "{}{}{}\t{}; ///< {}",
            self.comment_prefix(),
            self.typename,
            self.indirection(),
            self.cname,
            self.title
        )
    }

    /// Member declaration for the output slot.
    pub fn output_declaration(&self) -> String {
        format!(
            "{}{}\t{};",
            self.comment_prefix(),
            self.std_type_name(),
            self.output_name()
        )
    }
}
