use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use compsel::core::catalog::registry::CatalogFormat;
use compsel::engine::config::{SessionConfig, SessionConfigBuilder};
use std::path::PathBuf;
use tracing::debug;

/// Resolves the session configuration from, in increasing precedence: built-in
/// defaults, the config file, `-S` overrides, and dedicated CLI flags.
///
/// `query` is the search text given on the command line, if any.
pub fn build_config(cli: &Cli, query: Option<&str>) -> Result<SessionConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => match defaults.user_config_path() {
            Some(path) if path.exists() => {
                debug!("Using user configuration at {:?}", path);
                FileConfig::from_file(&path)?
            }
            _ => FileConfig::default(),
        },
    };

    let mut file_config = apply_set_values(file_config, &cli.set_values)?;

    let catalog_file = file_config.catalog.take().unwrap_or_default();
    let catalog_path = cli.catalog.clone().or(catalog_file.path).ok_or_else(|| {
        CliError::Config(
            "A catalog is required either in the config file (`catalog.path`) or via --catalog."
                .to_string(),
        )
    })?;

    let catalog_format = match cli.catalog_format {
        Some(format) => Some(format),
        None => catalog_file
            .format
            .as_deref()
            .map(parse_format)
            .transpose()?,
    };

    let flowsheet_path = cli
        .flowsheet
        .clone()
        .or(file_config.flowsheet.take().and_then(|f| f.path));

    let initial_query = query
        .map(str::to_string)
        .or(file_config.search.take().and_then(|s| s.query))
        .unwrap_or(defaults.query);

    SessionConfigBuilder::new()
        .catalog_path(catalog_path)
        .catalog_format(catalog_format)
        .flowsheet_path(flowsheet_path)
        .initial_query(initial_query)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn parse_format(value: &str) -> Result<CatalogFormat> {
    value.parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid catalog format '{}'. Expected 'csv' or 'toml'.",
            value
        ))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) = kv_pair.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;

        match key {
            "catalog.path" => {
                config.catalog.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value));
            }
            "catalog.format" => {
                parse_format(value)?;
                config.catalog.get_or_insert_with(Default::default).format =
                    Some(value.to_string());
            }
            "flowsheet.path" => {
                config.flowsheet.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value));
            }
            "search.query" => {
                config.search.get_or_insert_with(Default::default).query =
                    Some(value.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use std::path::Path;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn parse(config_path: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "compsel".to_string(),
            "check".to_string(),
            "-c".to_string(),
            config_path.to_str().unwrap().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::parse_from(args)
    }

    #[test]
    fn file_values_are_used_and_defaults_fill_the_rest() {
        let config_path = write_config_file(
            "config_file_only.toml",
            r#"
            [catalog]
            path = "compounds.toml"
            "#,
        );
        let cli = parse(&config_path, &[]);

        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.catalog_path, TEST_DIR.path().join("compounds.toml"));
        assert_eq!(config.catalog_format, None);
        assert_eq!(config.flowsheet_path, None);
        assert_eq!(config.initial_query, "");
    }

    #[test]
    fn cli_flags_override_file_values() {
        let config_path = write_config_file(
            "config_override.toml",
            r#"
            [catalog]
            path = "compounds.toml"
            format = "toml"

            [flowsheet]
            path = "plant.toml"

            [search]
            query = "water"
            "#,
        );
        let cli = parse(
            &config_path,
            &[
                "--catalog",
                "/data/other.csv",
                "--catalog-format",
                "csv",
                "--flowsheet",
                "/data/other.toml",
            ],
        );

        let config = build_config(&cli, Some("eth")).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("/data/other.csv"));
        assert_eq!(config.catalog_format, Some(CatalogFormat::Csv));
        assert_eq!(config.flowsheet_path, Some(PathBuf::from("/data/other.toml")));
        assert_eq!(config.initial_query, "eth");
    }

    #[test]
    fn set_values_override_file_values() {
        let config_path = write_config_file(
            "config_set.toml",
            r#"
            [catalog]
            path = "compounds.toml"

            [search]
            query = "water"
            "#,
        );
        let cli = parse(
            &config_path,
            &[
                "-S",
                "search.query=CH4",
                "-S",
                "catalog.format=TOML",
                "-S",
                "flowsheet.path=/plants/a.toml",
            ],
        );

        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.initial_query, "CH4");
        assert_eq!(config.catalog_format, Some(CatalogFormat::Toml));
        assert_eq!(config.flowsheet_path, Some(PathBuf::from("/plants/a.toml")));
    }

    #[test]
    fn missing_catalog_returns_config_error() {
        let config_path = write_config_file("config_empty.toml", "[search]\nquery = \"x\"\n");
        let cli = parse(&config_path, &[]);

        let result = build_config(&cli, None);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("catalog")));
    }

    #[test]
    fn malformed_or_unknown_set_values_are_rejected() {
        let config_path = write_config_file(
            "config_bad_set.toml",
            "[catalog]\npath = \"compounds.toml\"\n",
        );

        for bad in ["search.query", "catalog.colour=red", "catalog.format=xml"] {
            let cli = parse(&config_path, &["-S", bad]);
            assert!(
                matches!(build_config(&cli, None), Err(CliError::Config(_))),
                "expected config error for {bad}"
            );
        }
    }

    #[test]
    fn invalid_format_in_file_is_rejected() {
        let config_path = write_config_file(
            "config_bad_format.toml",
            "[catalog]\npath = \"compounds.dat\"\nformat = \"xml\"\n",
        );
        let cli = parse(&config_path, &[]);
        assert!(matches!(build_config(&cli, None), Err(CliError::Config(_))));
    }
}
