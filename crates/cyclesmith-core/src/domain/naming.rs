//! Cycle name handling.

use std::fmt;

use serde::Serialize;

/// Scope separator in fully qualified C++ names.
pub const SCOPE_SEPARATOR: &str = "::";

/// A cycle name split into namespace and class name.
///
/// Only one level of namespacing ends up in generated code; a name like
/// `A::B::Cls` gives the namespace `A::B` verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NamePair {
    namespace: String,
    class_name: String,
}

impl NamePair {
    /// Split a fully qualified name at its **last** `::`.
    ///
    /// Never fails: a name without separator has an empty namespace.
    pub fn split(full: &str) -> Self {
        match full.rsplit_once(SCOPE_SEPARATOR) {
            Some((namespace, class_name)) => Self {
                namespace: namespace.to_string(),
                class_name: class_name.to_string(),
            },
            None => Self {
                namespace: String::new(),
                class_name: full.to_string(),
            },
        }
    }

    /// Build a pair from already separated parts.
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            class_name: class_name.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn has_namespace(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// `namespace::Class`, or just `Class` without a namespace.
    pub fn full_name(&self) -> String {
        if self.has_namespace() {
            format!("{}{SCOPE_SEPARATOR}{}", self.namespace, self.class_name)
        } else {
            self.class_name.clone()
        }
    }

    /// Include-guard stem, e.g. `ANA_MYCYCLE` for `Ana::MyCycle`.
    pub fn guard_stem(&self) -> String {
        let stem = if self.has_namespace() {
            format!("{}_{}", self.namespace, self.class_name)
        } else {
            self.class_name.clone()
        };
        sanitize_identifier(&stem).to_uppercase()
    }
}

impl fmt::Display for NamePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// Turn an arbitrary branch name into a usable C++ identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, and a leading digit
/// gets a `_` prefix.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Whether `name` is a plain C++ identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
