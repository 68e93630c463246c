use crate::cli::{Cli, ToggleArgs};
use crate::config;
use crate::error::Result;
use crate::ui;
use crate::utils::events::CliEventHandler;
use compsel::engine::events::EventReporter;
use compsel::workflows::edit;
use tracing::{info, warn};

pub fn run(args: &ToggleArgs, cli: &Cli) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let session_config = config::build_config(cli, None)?;
    if session_config.flowsheet_path.is_none() {
        warn!("No flowsheet configured; toggles only affect the selected set.");
    }

    let handler = CliEventHandler::new();
    let reporter = EventReporter::with_callback(handler.get_callback());
    let mut session = edit::open(&session_config, &reporter)?;

    let outcome = session.toggle_all(args.names.as_slice(), &reporter);

    let tally = handler.tally();
    info!(
        "{} selected, {} deselected, {} rolled back.",
        tally.selected, tally.deselected, tally.rolled_back
    );

    for (name, membership) in outcome? {
        println!("{}: {}", name, membership);
    }
    print!("{}", ui::render_selection(&session.flowsheet));
    session.check()?;
    Ok(())
}
