use crate::core::catalog::registry::CatalogFormat;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub catalog_path: PathBuf,
    /// Explicit catalog format; inferred from the file extension when absent.
    pub catalog_format: Option<CatalogFormat>,
    pub flowsheet_path: Option<PathBuf>,
    pub initial_query: String,
}

#[derive(Default)]
pub struct SessionConfigBuilder {
    catalog_path: Option<PathBuf>,
    catalog_format: Option<CatalogFormat>,
    flowsheet_path: Option<PathBuf>,
    initial_query: Option<String>,
}

impl SessionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog_path(mut self, path: PathBuf) -> Self {
        self.catalog_path = Some(path);
        self
    }
    pub fn catalog_format(mut self, format: Option<CatalogFormat>) -> Self {
        self.catalog_format = format;
        self
    }
    pub fn flowsheet_path(mut self, path: Option<PathBuf>) -> Self {
        self.flowsheet_path = path;
        self
    }
    pub fn initial_query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = Some(query.into());
        self
    }

    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        Ok(SessionConfig {
            catalog_path: self
                .catalog_path
                .ok_or(ConfigError::MissingParameter("catalog_path"))?,
            catalog_format: self.catalog_format,
            flowsheet_path: self.flowsheet_path,
            initial_query: self.initial_query.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fails_without_catalog_path() {
        let result = SessionConfigBuilder::new().initial_query("water").build();
        assert_eq!(result, Err(ConfigError::MissingParameter("catalog_path")));
    }

    #[test]
    fn build_applies_defaults_for_optional_fields() {
        let config = SessionConfigBuilder::new()
            .catalog_path(PathBuf::from("compounds.csv"))
            .build()
            .unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("compounds.csv"));
        assert_eq!(config.catalog_format, None);
        assert_eq!(config.flowsheet_path, None);
        assert_eq!(config.initial_query, "");
    }

    #[test]
    fn build_keeps_every_explicit_value() {
        let config = SessionConfigBuilder::new()
            .catalog_path(PathBuf::from("compounds.dat"))
            .catalog_format(Some(CatalogFormat::Csv))
            .flowsheet_path(Some(PathBuf::from("plant.toml")))
            .initial_query("me")
            .build()
            .unwrap();
        assert_eq!(config.catalog_format, Some(CatalogFormat::Csv));
        assert_eq!(config.flowsheet_path, Some(PathBuf::from("plant.toml")));
        assert_eq!(config.initial_query, "me");
    }
}
