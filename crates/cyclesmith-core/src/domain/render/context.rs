use std::collections::HashMap;

use crate::domain::naming::NamePair;

/// Context for `{{VARIABLE}}` substitution in the C++ templates.
///
/// Seeded from the cycle name with `CLASS`, `NAMESPACE`, `FULL_CLASS` and
/// `GUARD`; sections are added with [`RenderContext::with_variable`].
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(names: &NamePair) -> Self {
        let mut vars = HashMap::new();
        vars.insert("CLASS".to_string(), names.class_name().to_string());
        vars.insert("NAMESPACE".to_string(), names.namespace().to_string());
        vars.insert("FULL_CLASS".to_string(), names.full_name());
        vars.insert("GUARD".to_string(), names.guard_stem());
        Self { variables: vars }
    }

    /// Add a variable, consuming self and returning the extended context.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace every known `{{VARIABLE}}` placeholder in one left-to-right
    /// pass.
    ///
    /// Unknown placeholders are left as they are. Substituted values are
    /// copied verbatim, even when they contain placeholders themselves.
    pub fn render(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            result.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                rest = &rest[open..];
                break;
            };
            match self.variables.get(&after_open[..close]) {
                Some(value) => result.push_str(value),
                None => result.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after_open[close + 2..];
        }

        result.push_str(rest);
        result
    }
}
