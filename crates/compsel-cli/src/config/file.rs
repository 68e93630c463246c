use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileCatalogConfig {
    pub path: Option<PathBuf>,
    pub format: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileFlowsheetConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSearchConfig {
    pub query: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub catalog: Option<FileCatalogConfig>,
    pub flowsheet: Option<FileFlowsheetConfig>,
    pub search: Option<FileSearchConfig>,
}

impl FileConfig {
    /// Reads a config file. Relative paths inside it are resolved against the
    /// directory that contains the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: FileConfig =
            toml::from_str(&content).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        let rebase = |p: &mut Option<PathBuf>| {
            if let Some(inner) = p.as_mut() {
                if inner.is_relative() {
                    *inner = base.join(&*inner);
                }
            }
        };
        if let Some(catalog) = self.catalog.as_mut() {
            rebase(&mut catalog.path);
        }
        if let Some(flowsheet) = self.flowsheet.as_mut() {
            rebase(&mut flowsheet.path);
        }
    }
}
