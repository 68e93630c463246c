use super::entry::CatalogEntry;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// On-disk layout of a TOML catalog: a list of `[[compound]]` tables.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawCatalogFile {
    #[serde(default)]
    compound: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Csv,
    Toml,
}

#[derive(Debug, Error)]
#[error("Invalid catalog format string")]
pub struct ParseCatalogFormatError;

impl FromStr for CatalogFormat {
    type Err = ParseCatalogFormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(CatalogFormat::Csv),
            "toml" => Ok(CatalogFormat::Toml),
            _ => Err(ParseCatalogFormatError),
        }
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CatalogFormat::Csv => "csv",
                CatalogFormat::Toml => "toml",
            }
        )
    }
}

impl CatalogFormat {
    /// Infers the format from the file extension, if it is a known one.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Cannot infer catalog format for '{path}'; expected a .csv or .toml file")]
    UnknownFormat { path: String },
    #[error("Compound '{0}' appears more than once in the catalog")]
    DuplicateName(String),
    #[error("Catalog contains a compound with an empty name")]
    EmptyName,
}

/// The set of compounds available to a simulation context, keyed by name.
///
/// Entries are reference-counted so that the selected set and every phase
/// compound can point at the same constant properties without copying them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, Arc<CatalogEntry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from entries, rejecting empty and duplicate names.
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogLoadError>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.name.is_empty() {
                return Err(CatalogLoadError::EmptyName);
            }
            if map.contains_key(&entry.name) {
                return Err(CatalogLoadError::DuplicateName(entry.name));
            }
            map.insert(entry.name.clone(), Arc::new(entry));
        }
        Ok(Self { entries: map })
    }

    /// Loads a catalog, inferring the format from the file extension.
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let format = CatalogFormat::from_path(path).ok_or_else(|| {
            CatalogLoadError::UnknownFormat {
                path: path.to_string_lossy().to_string(),
            }
        })?;
        Self::load_with_format(path, format)
    }

    pub fn load_with_format(path: &Path, format: CatalogFormat) -> Result<Self, CatalogLoadError> {
        debug!("Loading {} catalog from {:?}", format, path);
        let entries = match format {
            CatalogFormat::Csv => Self::read_csv(path)?,
            CatalogFormat::Toml => Self::read_toml(path)?,
        };
        let catalog = Self::from_entries(entries)?;
        debug!("Catalog loaded with {} compound(s).", catalog.len());
        Ok(catalog)
    }

    fn read_csv(path: &Path) -> Result<Vec<CatalogEntry>, CatalogLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| CatalogLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let mut entries = Vec::new();
        for result in reader.deserialize::<CatalogEntry>() {
            let record = result.map_err(|e| CatalogLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            entries.push(record);
        }
        Ok(entries)
    }

    fn read_toml(path: &Path) -> Result<Vec<CatalogEntry>, CatalogLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: RawCatalogFile = toml::from_str(&content).map_err(|e| CatalogLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Ok(raw.compound)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<CatalogEntry>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of compounds available.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in ascending name order.
    pub fn entries(&self) -> impl Iterator<Item = &Arc<CatalogEntry>> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn from_entries_rejects_duplicate_names() {
        let result = Catalog::from_entries(vec![
            CatalogEntry::new("Water", "H2O", "7732-18-5", "DWSIM"),
            CatalogEntry::new("Water", "H2O", "7732-18-5", "ChemSep"),
        ]);
        assert!(matches!(result, Err(CatalogLoadError::DuplicateName(name)) if name == "Water"));
    }

    #[test]
    fn from_entries_rejects_empty_names() {
        let result = Catalog::from_entries(vec![CatalogEntry::new("", "H2O", "", "")]);
        assert!(matches!(result, Err(CatalogLoadError::EmptyName)));
    }

    #[test]
    fn names_are_case_sensitive_identities() {
        let catalog = Catalog::from_entries(vec![
            CatalogEntry::new("water", "H2O", "", ""),
            CatalogEntry::new("Water", "H2O", "", ""),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("Water"));
        assert!(!catalog.contains("WATER"));
    }

    #[test]
    fn load_csv_succeeds_with_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("compounds.csv");
        fs::write(
            &file_path,
            "name,formula,cas_number,source_database\n\
             Water,H2O,7732-18-5,DWSIM\n\
             Methanol,CH4O,67-56-1,ChemSep\n",
        )
        .unwrap();

        let catalog = Catalog::load(&file_path).unwrap();
        assert_eq!(catalog.len(), 2);
        let methanol = catalog.get("Methanol").unwrap();
        assert_eq!(methanol.formula, "CH4O");
        assert_eq!(methanol.cas_number, "67-56-1");
        assert_eq!(methanol.source_database, "ChemSep");
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Methanol", "Water"]);
    }

    #[test]
    fn load_toml_succeeds_with_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("compounds.toml");
        fs::write(
            &file_path,
            r#"
            [[compound]]
            name = "Ethanol"
            formula = "C2H6O"
            cas = "64-17-5"
            database = "ChemSep"

            [[compound]]
            name = "Water"
            formula = "H2O"
            "#,
        )
        .unwrap();

        let catalog = Catalog::load(&file_path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Ethanol").unwrap().cas_number, "64-17-5");
        assert_eq!(catalog.get("Water").unwrap().source_database, "");
    }

    #[test]
    fn load_fails_for_unknown_extension() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("compounds.json");
        fs::write(&file_path, "{}").unwrap();
        let result = Catalog::load(&file_path);
        assert!(matches!(result, Err(CatalogLoadError::UnknownFormat { .. })));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = Catalog::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(CatalogLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        fs::write(&file_path, "this is not toml").unwrap();
        let result = Catalog::load(&file_path);
        assert!(matches!(result, Err(CatalogLoadError::Toml { .. })));
    }

    #[test]
    fn load_fails_for_malformed_csv() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.csv");
        fs::write(&file_path, "name,formula\nWater,H2O,extra\n").unwrap();
        let result = Catalog::load(&file_path);
        assert!(matches!(result, Err(CatalogLoadError::Csv { .. })));
    }

    #[test]
    fn catalog_format_parses_case_insensitively() {
        assert_eq!("CSV".parse::<CatalogFormat>().unwrap(), CatalogFormat::Csv);
        assert_eq!("toml".parse::<CatalogFormat>().unwrap(), CatalogFormat::Toml);
        assert!("json".parse::<CatalogFormat>().is_err());
        assert_eq!(
            CatalogFormat::from_path(Path::new("data/compounds.csv")),
            Some(CatalogFormat::Csv)
        );
    }
}
