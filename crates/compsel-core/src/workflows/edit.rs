use crate::core::catalog::registry::Catalog;
use crate::core::io::layout::FlowsheetLayout;
use crate::core::models::flowsheet::Flowsheet;
use crate::engine::config::SessionConfig;
use crate::engine::error::EngineError;
use crate::engine::events::EventReporter;
use crate::engine::session::CompoundEditor;
use crate::engine::sync::{self, Membership};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A flowsheet together with the editor presenting its compound selection.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub flowsheet: Flowsheet,
    pub editor: CompoundEditor,
}

/// Opens an editing session described by `config`.
///
/// The catalog is loaded first. If a flowsheet layout is configured its objects
/// are created and its initial selection is applied through the synchronizer,
/// so every stream is consistent before the session is returned. Without a
/// layout the session starts from an empty flowsheet.
#[instrument(skip_all, name = "open_session")]
pub fn open(config: &SessionConfig, reporter: &EventReporter) -> Result<EditSession, EngineError> {
    let catalog = match config.catalog_format {
        Some(format) => Catalog::load_with_format(&config.catalog_path, format)?,
        None => Catalog::load(&config.catalog_path)?,
    };
    info!("Number of compounds available: {}", catalog.len());
    let catalog = Arc::new(catalog);

    let flowsheet = match &config.flowsheet_path {
        Some(path) => {
            let layout = FlowsheetLayout::load(path)?;
            build_flowsheet(catalog, &layout, reporter)?
        }
        None => Flowsheet::new(catalog),
    };

    let mut editor = CompoundEditor::new(&flowsheet);
    if !config.initial_query.is_empty() {
        editor.set_query(&config.initial_query, flowsheet.selected(), reporter);
    }

    info!(
        "Session ready: {} selected compound(s), {} dependent phase(s).",
        flowsheet.selected().len(),
        flowsheet.dependent_count()
    );
    Ok(EditSession { flowsheet, editor })
}

/// Builds a flowsheet from a layout and selects the layout's compounds.
///
/// Names listed more than once are selected once.
pub fn build_flowsheet(
    catalog: Arc<Catalog>,
    layout: &FlowsheetLayout,
    reporter: &EventReporter,
) -> Result<Flowsheet, EngineError> {
    let mut flowsheet = layout.build_objects(catalog)?;
    for name in &layout.selected {
        if flowsheet.selected().contains(name) {
            warn!("'{}' is listed more than once in the layout selection.", name);
            continue;
        }
        sync::toggle_compound(&mut flowsheet, name, reporter)?;
    }
    Ok(flowsheet)
}

impl EditSession {
    pub fn toggle(&mut self, name: &str, reporter: &EventReporter) -> Result<Membership, EngineError> {
        Ok(self.editor.toggle(&mut self.flowsheet, name, reporter)?)
    }

    /// Applies toggles in order, stopping at the first failure.
    ///
    /// Toggles applied before the failure stay applied; the failing toggle
    /// itself leaves no trace.
    #[instrument(skip_all, fields(count = names.len()))]
    pub fn toggle_all<S: AsRef<str>>(
        &mut self,
        names: &[S],
        reporter: &EventReporter,
    ) -> Result<Vec<(String, Membership)>, EngineError> {
        let mut results = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let membership = self.toggle(name, reporter)?;
            info!("'{}' is now {}.", name, membership);
            results.push((name.to_string(), membership));
        }
        Ok(results)
    }

    pub fn set_query(&mut self, text: &str, reporter: &EventReporter) {
        self.editor
            .set_query(text, self.flowsheet.selected(), reporter);
    }

    pub fn check(&self) -> Result<(), EngineError> {
        Ok(self.flowsheet.check_consistency()?)
    }
}
