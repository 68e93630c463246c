use clap::{Args, Parser, Subcommand};
use compsel::core::catalog::registry::CatalogFormat;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "COMPSEL Contributors",
    version,
    about = "COMPSEL CLI - Search a compound catalog and keep every material stream of a flowsheet in step with the selected compounds.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the user configuration directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the compound catalog file (.csv or .toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Override the catalog format instead of detecting it from the extension.
    #[arg(long, global = true, value_name = "csv|toml")]
    pub catalog_format: Option<CatalogFormat>,

    /// Override the flowsheet layout file.
    #[arg(long, global = true, value_name = "PATH")]
    pub flowsheet: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.query=eth
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter the catalog and show which matches are selected.
    Search(SearchArgs),
    /// Select or deselect compounds across every material stream of the flowsheet.
    Toggle(ToggleArgs),
    /// Verify that every phase of every material stream holds exactly the selected compounds.
    Check,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Case-insensitive text matched against name, formula, CAS number and database.
    /// Overrides `search.query` from the config file.
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,
}

/// Arguments for the `toggle` subcommand.
#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Compound names to toggle, applied in order.
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::parse_from([
            "compsel",
            "search",
            "eth",
            "--catalog",
            "compounds.csv",
            "-vv",
            "-S",
            "flowsheet.path=plant.toml",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.catalog, Some(PathBuf::from("compounds.csv")));
        assert_eq!(cli.set_values, vec!["flowsheet.path=plant.toml".to_string()]);
        match cli.command {
            Commands::Search(args) => assert_eq!(args.query.as_deref(), Some("eth")),
            other => panic!("Expected 'search' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn toggle_requires_at_least_one_name() {
        assert!(Cli::try_parse_from(["compsel", "toggle"]).is_err());
        let cli = Cli::parse_from(["compsel", "toggle", "Water", "Ethanol"]);
        match cli.command {
            Commands::Toggle(args) => assert_eq!(args.names, vec!["Water", "Ethanol"]),
            other => panic!("Expected 'toggle' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn catalog_format_is_parsed() {
        let cli = Cli::parse_from(["compsel", "check", "--catalog-format", "toml"]);
        assert_eq!(cli.catalog_format, Some(CatalogFormat::Toml));
        assert!(Cli::try_parse_from(["compsel", "check", "--catalog-format", "xml"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["compsel", "check", "-q", "-v"]).is_err());
    }
}
