//! Field sources: user-written selection files and data-file schemas.
//!
//! A selection file lists one `<type> <name>` per line. A data file is
//! described by a JSON schema naming its trees and their typed fields.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use cyclesmith_core::{
    application::{ApplicationError, ports::Filesystem, ports::FieldSource},
    domain::{DomainError, FieldModel, options::DEFAULT_TREE_NAME},
    error::CycleResult,
};

/// Problems reading a data-file schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("not a valid data-file schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tree '{tree}' not found (available: {available})")]
    UnknownTree { tree: String, available: String },
}

/// Introspectable description of a data file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DataSchema {
    #[serde(default)]
    pub trees: Vec<TreeSchema>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TreeSchema {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub typename: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl DataSchema {
    pub fn first_tree(&self) -> Option<&str> {
        self.trees.first().map(|t| t.name.as_str())
    }

    /// Fields of `tree`, in schema order.
    pub fn fields(&self, tree: &str) -> Result<Vec<FieldModel>, SchemaError> {
        let found = self
            .trees
            .iter()
            .find(|t| t.name == tree)
            .ok_or_else(|| SchemaError::UnknownTree {
                tree: tree.to_string(),
                available: self
                    .trees
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        Ok(found
            .fields
            .iter()
            .map(|f| {
                let field = FieldModel::new(&f.name, &f.typename);
                match &f.title {
                    Some(title) => field.with_title(title),
                    None => field,
                }
            })
            .collect())
    }
}

pub fn parse_schema(text: &str) -> Result<DataSchema, SchemaError> {
    Ok(serde_json::from_str(text)?)
}

/// Parse a selection file.
///
/// Blank lines and `#` lines are skipped, a leading `//` keeps the field but
/// comments out everything generated for it, and `: title` sets its title.
pub fn parse_selection(text: &str) -> Result<Vec<FieldModel>, DomainError> {
    let mut fields = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (line, commented) = match line.strip_prefix("//") {
            Some(rest) => (rest.trim(), true),
            None => (line, false),
        };
        let (decl, title) = split_title(line);

        let invalid = |reason: &str| DomainError::InvalidFieldSelection {
            line: index + 1,
            reason: reason.to_string(),
        };
        let (typename, name) = decl
            .rsplit_once(char::is_whitespace)
            .map(|(ty, name)| (ty.trim(), name.trim()))
            .ok_or_else(|| invalid("expected '<type> <name>'"))?;
        if typename.is_empty() || name.is_empty() {
            return Err(invalid("expected '<type> <name>'"));
        }

        let mut field = FieldModel::new(name, typename);
        if let Some(title) = title {
            field = field.with_title(title);
        }
        if commented {
            field = field.commented_out();
        }
        fields.push(field);
    }
    Ok(fields)
}

/// Split off a trailing `: title`. A `::` scope separator is not a title marker.
fn split_title(line: &str) -> (&str, Option<&str>) {
    let bytes = line.as_bytes();
    let marker = (0..bytes.len()).find(|&i| {
        bytes[i] == b':'
            && (i == 0 || bytes[i - 1] != b':')
            && bytes.get(i + 1).is_none_or(|&next| next != b':')
    });
    match marker {
        Some(i) => {
            let title = line[i + 1..].trim();
            (line[..i].trim(), (!title.is_empty()).then_some(title))
        }
        None => (line, None),
    }
}

/// [`FieldSource`] over selection files and JSON data-file schemas.
#[derive(Debug, Clone)]
pub struct SchemaFieldSource<F> {
    filesystem: F,
    default_tree: String,
}

impl<F: Filesystem> SchemaFieldSource<F> {
    pub fn new(filesystem: F) -> Self {
        Self {
            filesystem,
            default_tree: DEFAULT_TREE_NAME.to_string(),
        }
    }

    /// Tree name reported when there is no data file to ask.
    pub fn with_default_tree(mut self, tree: impl Into<String>) -> Self {
        self.default_tree = tree.into();
        self
    }

    fn schema(&self, path: &Path) -> CycleResult<DataSchema> {
        let text = self.filesystem.read_to_string(path)?;
        parse_schema(&text).map_err(|e| field_source_error(path, e))
    }
}

impl<F: Filesystem> FieldSource for SchemaFieldSource<F> {
    fn default_tree_name(&self, data_file: Option<&Path>) -> CycleResult<String> {
        let Some(path) = data_file else {
            return Ok(self.default_tree.clone());
        };
        match self.schema(path)?.first_tree() {
            Some(tree) => {
                debug!(tree, file = %path.display(), "Found input tree");
                Ok(tree.to_string())
            }
            None => {
                warn!(
                    file = %path.display(),
                    tree = %self.default_tree,
                    "Data file describes no trees, using the default tree name"
                );
                Ok(self.default_tree.clone())
            }
        }
    }

    #[instrument(skip(self), fields(file = %path.display()))]
    fn read_selection(&self, path: &Path) -> CycleResult<Vec<FieldModel>> {
        let text = self.filesystem.read_to_string(path)?;
        let fields = parse_selection(&text).map_err(|e| ApplicationError::document(path, e))?;
        debug!(count = fields.len(), "Read field selection");
        Ok(fields)
    }

    #[instrument(skip(self), fields(file = %data_file.display()))]
    fn read_fields(&self, data_file: &Path, tree: &str) -> CycleResult<Vec<FieldModel>> {
        let fields = self
            .schema(data_file)?
            .fields(tree)
            .map_err(|e| field_source_error(data_file, e))?;
        debug!(count = fields.len(), "Read fields from data file");
        Ok(fields)
    }
}

fn field_source_error(path: &Path, e: SchemaError) -> cyclesmith_core::error::CycleError {
    ApplicationError::FieldSource {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFilesystem;

    const SCHEMA: &str = r#"{
        "trees": [
            { "name": "physics", "fields": [
                { "name": "el_pt", "type": "std::vector<float>", "title": "Electron pT" },
                { "name": "mc_channel", "type": "Int_t" }
            ] },
            { "name": "meta", "fields": [] }
        ]
    }"#;

    #[test]
    fn selection_lines() {
        let text = "\
# electrons
std::vector<float> el_pt : Electron pT
unsigned int   n

// float mc_weight
";
        let fields = parse_selection(text).unwrap();
        assert_eq!(fields.len(), 3);

        assert_eq!(fields[0].typename(), "std::vector<float>");
        assert_eq!(fields[0].name(), "el_pt");
        assert_eq!(fields[0].title(), "Electron pT");
        assert!(fields[0].is_pointer());

        assert_eq!(fields[1].typename(), "unsigned int");
        assert_eq!(fields[1].title(), "n");

        assert!(fields[2].is_commented());
        assert_eq!(fields[2].name(), "mc_weight");
    }

    #[test]
    fn scope_separator_is_not_a_title() {
        let fields = parse_selection("std::map<int,std::string> lookup").unwrap();
        assert_eq!(fields[0].typename(), "std::map<int,std::string>");
        assert_eq!(fields[0].title(), "lookup");
    }

    #[test]
    fn malformed_line_names_its_number() {
        let err = parse_selection("int a\n\nlonely\n").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidFieldSelection {
                line: 3,
                reason: "expected '<type> <name>'".into(),
            }
        );
    }

    #[test]
    fn schema_fields_in_order() {
        let schema = parse_schema(SCHEMA).unwrap();
        assert_eq!(schema.first_tree(), Some("physics"));

        let fields = schema.fields("physics").unwrap();
        assert_eq!(fields[0].title(), "Electron pT");
        assert_eq!(fields[1].name(), "mc_channel");
        assert_eq!(fields[1].title(), "mc_channel");
        assert!(schema.fields("meta").unwrap().is_empty());
    }

    #[test]
    fn unknown_tree_lists_alternatives() {
        let err = parse_schema(SCHEMA).unwrap().fields("nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "tree 'nope' not found (available: physics, meta)"
        );
    }

    #[test]
    fn source_reads_through_the_filesystem() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/data/sample.json", SCHEMA).unwrap();
        let source = SchemaFieldSource::new(fs);
        let path = Path::new("/data/sample.json");

        assert_eq!(source.default_tree_name(Some(path)).unwrap(), "physics");
        assert_eq!(source.default_tree_name(None).unwrap(), "CollectionTree");
        assert_eq!(source.read_fields(path, "physics").unwrap().len(), 2);
        assert!(source.read_fields(path, "nope").is_err());
    }

    #[test]
    fn empty_schema_falls_back_to_default_tree() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/data/empty.json", "{}").unwrap();
        let source = SchemaFieldSource::new(fs).with_default_tree("events");
        assert_eq!(
            source
                .default_tree_name(Some(Path::new("/data/empty.json")))
                .unwrap(),
            "events"
        );
    }
}
