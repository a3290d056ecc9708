//! Monte-Carlo tagging of fields.
//!
//! Fields whose name matches one of the configured patterns are only read for
//! simulated samples. The patterns come from a comma separated list given on
//! the command line and are matched case-insensitively anywhere in the name.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::domain::{error::DomainError, field::FieldModel};

/// Default tag list used when nothing else is configured.
pub const DEFAULT_MC_TAGS: &str = "mc_,truth";

/// Kind of sample a cycle is set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    #[default]
    Data,
    Mc,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "DATA",
            Self::Mc => "MC",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled set of Monte-Carlo tag patterns.
#[derive(Debug, Clone, Default)]
pub struct McTagger {
    patterns: Vec<Regex>,
}

impl McTagger {
    /// Compile a comma separated pattern list.
    ///
    /// Empty entries are ignored. Entries that are not valid regular
    /// expressions are skipped and returned alongside the tagger so the
    /// caller can report them; the remaining patterns still apply.
    pub fn compile(tags: &str) -> (Self, Vec<DomainError>) {
        let mut patterns = Vec::new();
        let mut rejected = Vec::new();

        for tag in tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match RegexBuilder::new(tag).case_insensitive(true).build() {
                Ok(re) => patterns.push(re),
                Err(e) => rejected.push(DomainError::InvalidTagPattern {
                    pattern: tag.to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        (Self { patterns }, rejected)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether any pattern matches `name`.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(name))
    }

    /// Tag every matching field and report the resulting sample type.
    pub fn tag(&self, fields: &mut [FieldModel]) -> DataType {
        let mut any_mc = false;
        for field in fields.iter_mut() {
            if self.matches(field.name()) {
                field.mark_monte_carlo();
                any_mc = true;
            }
        }
        if any_mc { DataType::Mc } else { DataType::Data }
    }
}
