use crate::cli::{Cli, SearchArgs};
use crate::config;
use crate::error::Result;
use crate::ui;
use crate::utils::events::CliEventHandler;
use compsel::engine::events::EventReporter;
use compsel::workflows::edit;
use tracing::info;

pub fn run(args: &SearchArgs, cli: &Cli) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let session_config = config::build_config(cli, args.query.as_deref())?;

    let handler = CliEventHandler::new();
    let reporter = EventReporter::with_callback(handler.get_callback());
    let session = edit::open(&session_config, &reporter)?;

    let view = session.editor.view();
    println!("{}", ui::render_view(view));
    println!(
        "{} match(es) for '{}'. Number of compounds available: {}",
        view.len(),
        session.editor.query(),
        session.editor.available_count()
    );
    Ok(())
}
