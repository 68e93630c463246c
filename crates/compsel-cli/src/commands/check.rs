use crate::cli::Cli;
use crate::config;
use crate::error::{CliError, Result};
use crate::ui;
use compsel::engine::events::EventReporter;
use compsel::workflows::edit;
use tracing::info;

pub fn run(cli: &Cli) -> Result<()> {
    let session_config = config::build_config(cli, None)?;
    if session_config.flowsheet_path.is_none() {
        return Err(CliError::Argument(
            "The 'check' command needs a flowsheet (`flowsheet.path` or --flowsheet).".to_string(),
        ));
    }

    let session = edit::open(&session_config, &EventReporter::new())?;
    info!(
        "Checking {} dependent phase(s).",
        session.flowsheet.dependent_count()
    );
    session.check()?;

    print!("{}", ui::render_selection(&session.flowsheet));
    println!("Flowsheet is consistent.");
    Ok(())
}
