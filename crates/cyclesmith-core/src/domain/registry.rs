//! Dictionary registration file (`LinkDef.h`).
//!
//! The file is a list of `#pragma link C++ class <type>+;` lines closed by an
//! `#endif` line. New registrations go right before the last such line and
//! everything else is kept byte for byte.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    error::DomainError,
    options::RegistryOptions,
    render::{RenderContext, templates::REGISTRY_SKELETON},
    types::normalize_type,
};

/// Closing marker of a registry file.
pub const SENTINEL: &str = "#endif";

/// Container instantiations the dictionary generator already knows about.
const EXEMPT_TYPES: [&str; 6] = [
    "vector<int>",
    "vector<float>",
    "vector<short>",
    "vector<unsigned short>",
    "vector<unsigned int>",
    "vector<double>",
];

static REGISTRATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#pragma link C\+\+ class (?P<type>.*?)\+;").expect("registration pattern is valid")
});

/// One registration line.
pub fn registration_line(typename: &str) -> String {
    format!("#pragma link C++ class {typename}+;")
}

/// Comparison key of a type: normalized, without `std::`.
fn type_key(typename: &str) -> String {
    normalize_type(typename).replace("std::", "")
}

fn is_exempt(typename: &str) -> bool {
    let key = type_key(typename);
    EXEMPT_TYPES.iter().any(|t| type_key(t) == key)
}

/// An existing registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryDocument {
    text: String,
}

impl RegistryDocument {
    pub fn parse(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// A fresh file registering `lines`.
    pub fn skeleton(lines: &[String]) -> Self {
        let new_lines: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let text = RenderContext::default()
            .with_variable("NEW_LINES", new_lines)
            .render(REGISTRY_SKELETON);
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Comparison keys of every registered type.
    pub fn registered_types(&self) -> HashSet<String> {
        REGISTRATION
            .captures_iter(&self.text)
            .map(|caps| type_key(&caps["type"]))
            .collect()
    }

    fn sentinel_offset(&self) -> Option<usize> {
        let mut offset = 0;
        let mut found = None;
        for line in self.text.split_inclusive('\n') {
            if line.trim_start().starts_with(SENTINEL) {
                found = Some(offset);
            }
            offset += line.len();
        }
        found
    }

    pub fn has_sentinel(&self) -> bool {
        self.sentinel_offset().is_some()
    }

    /// Insert `lines` before the last sentinel line.
    pub fn insert_before_sentinel(&self, lines: &[String]) -> Result<Self, DomainError> {
        let at = self
            .sentinel_offset()
            .ok_or(DomainError::MissingSentinel { sentinel: SENTINEL })?;
        let mut text = String::with_capacity(self.text.len() + lines.len() * 40);
        text.push_str(&self.text[..at]);
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(&self.text[at..]);
        Ok(Self { text })
    }
}

/// Registration lines still missing from `existing`.
///
/// The class comes first, followed by the pointer-accessed field types in
/// field order, each at most once.
pub fn plan_registrations(
    opts: &RegistryOptions<'_>,
    existing: Option<&RegistryDocument>,
) -> Vec<String> {
    let mut known = existing
        .map(RegistryDocument::registered_types)
        .unwrap_or_default();
    let mut lines = Vec::new();

    let class = opts.names.full_name();
    if known.insert(type_key(&class)) {
        lines.push(registration_line(&class));
    }

    for field in opts.fields.iter().filter(|f| f.is_pointer()) {
        let typename = field.typename();
        if is_exempt(typename) {
            continue;
        }
        if known.insert(type_key(typename)) {
            lines.push(registration_line(&normalize_type(typename)));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{field::FieldModel, naming::NamePair};

    fn fields() -> Vec<FieldModel> {
        vec![
            FieldModel::new("el_pt", "std::vector<float>"),
            FieldModel::new("jets", "std::vector<std::vector<float> >"),
            FieldModel::new("more_jets", "vector<vector<float>>"),
            FieldModel::new("n", "int"),
        ]
    }

    #[test]
    fn plans_class_and_unique_non_exempt_types() {
        let names = NamePair::split("Ana::Cyc");
        let fields = fields();
        let opts = RegistryOptions::new(&names, &fields);

        assert_eq!(
            plan_registrations(&opts, None),
            vec![
                "#pragma link C++ class Ana::Cyc+;".to_string(),
                "#pragma link C++ class std::vector<std::vector<float> >+;".to_string(),
            ]
        );
    }

    #[test]
    fn skeleton_then_rerun_adds_nothing() {
        let names = NamePair::split("Cyc");
        let fields = fields();
        let opts = RegistryOptions::new(&names, &fields);

        let doc = RegistryDocument::skeleton(&plan_registrations(&opts, None));
        assert!(doc.has_sentinel());
        assert!(doc.as_str().contains("#pragma link C++ class Cyc+;\n"));
        assert!(plan_registrations(&opts, Some(&doc)).is_empty());
    }

    #[test]
    fn inserts_before_last_sentinel_and_keeps_the_rest() {
        let doc = RegistryDocument::parse(
            "#ifdef __CINT__\n#pragma link C++ class Old+;\n\n#endif // __CINT__\n",
        );
        let updated = doc
            .insert_before_sentinel(&["#pragma link C++ class New+;".to_string()])
            .unwrap();
        assert_eq!(
            updated.as_str(),
            "#ifdef __CINT__\n#pragma link C++ class Old+;\n\n#pragma link C++ class New+;\n#endif // __CINT__\n"
        );
    }

    #[test]
    fn missing_sentinel_is_an_error() {
        let doc = RegistryDocument::parse("#pragma link C++ class Old+;\n");
        assert!(!doc.has_sentinel());
        assert_eq!(
            doc.insert_before_sentinel(&[]),
            Err(DomainError::MissingSentinel { sentinel: SENTINEL })
        );
    }

    #[test]
    fn registered_types_are_normalized() {
        let doc = RegistryDocument::parse(
            "#pragma link C++ class std::vector< MyObj >+;\n#endif\n",
        );
        let names = NamePair::split("Cyc");
        let fields = vec![FieldModel::new("objs", "vector<MyObj>")];
        let opts = RegistryOptions::new(&names, &fields);
        assert_eq!(
            plan_registrations(&opts, Some(&doc)),
            vec!["#pragma link C++ class Cyc+;".to_string()]
        );
    }

    #[test]
    fn exempt_types_match_with_or_without_std() {
        assert!(is_exempt("vector<int>"));
        assert!(is_exempt("std::vector< unsigned int >"));
        assert!(!is_exempt("std::vector<std::string>"));
    }
}
