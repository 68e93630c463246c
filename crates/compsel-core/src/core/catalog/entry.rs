use serde::Deserialize;
use std::fmt;

/// Constant, externally supplied description of a single compound.
///
/// The `name` is the identity of the compound: it is unique within a catalog and
/// compared case-sensitively. The remaining fields are only used for display and
/// for case-insensitive searching.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default, alias = "cas")]
    pub cas_number: String,
    #[serde(default, alias = "database")]
    pub source_database: String,
}

impl CatalogEntry {
    pub fn new(name: &str, formula: &str, cas_number: &str, source_database: &str) -> Self {
        Self {
            name: name.to_string(),
            formula: formula.to_string(),
            cas_number: cas_number.to_string(),
            source_database: source_database.to_string(),
        }
    }

    /// Returns `true` if `needle` occurs in any searchable field.
    ///
    /// `needle` must already be lower-cased; each field is lower-cased before the
    /// containment test.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [
            &self.name,
            &self.formula,
            &self.cas_number,
            &self.source_database,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.formula)
    }
}
