use crate::core::catalog::registry::Catalog;
use crate::core::models::flowsheet::{Flowsheet, FlowsheetError};
use crate::core::models::object::ObjectKind;
use crate::core::models::phase::PhaseKind;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ObjectLayout {
    pub tag: String,
    pub kind: String,
    #[serde(default)]
    pub phases: Option<Vec<String>>,
}

/// Description of a flowsheet: its simulation objects and the compounds that
/// should be selected once the objects exist.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FlowsheetLayout {
    #[serde(default)]
    pub selected: Vec<String>,
    #[serde(default, rename = "object")]
    pub objects: Vec<ObjectLayout>,
}

#[derive(Debug, Error)]
pub enum LayoutLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown kind '{kind}' for object '{tag}'")]
    InvalidObjectKind { tag: String, kind: String },
    #[error("Unknown phase '{phase}' for object '{tag}'")]
    InvalidPhase { tag: String, phase: String },
    #[error(transparent)]
    Flowsheet(#[from] FlowsheetError),
}

impl FlowsheetLayout {
    pub fn load(path: &Path) -> Result<Self, LayoutLoadError> {
        debug!("Loading flowsheet layout from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| LayoutLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| LayoutLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Creates the described objects in a new flowsheet.
    ///
    /// The returned flowsheet has nothing selected; `selected` is left for the
    /// caller to apply through the selection synchronizer.
    pub fn build_objects(&self, catalog: Arc<Catalog>) -> Result<Flowsheet, LayoutLoadError> {
        let mut flowsheet = Flowsheet::new(catalog);
        for object in &self.objects {
            let kind: ObjectKind =
                object
                    .kind
                    .parse()
                    .map_err(|_| LayoutLoadError::InvalidObjectKind {
                        tag: object.tag.clone(),
                        kind: object.kind.clone(),
                    })?;

            match (&object.phases, kind) {
                (Some(phases), ObjectKind::MaterialStream) => {
                    let phases = phases
                        .iter()
                        .map(|p| {
                            p.parse::<PhaseKind>()
                                .map_err(|_| LayoutLoadError::InvalidPhase {
                                    tag: object.tag.clone(),
                                    phase: p.clone(),
                                })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    flowsheet.add_material_stream_with_phases(&object.tag, &phases)?;
                }
                (Some(_), kind) => {
                    return Err(FlowsheetError::PhasesNotSupported {
                        tag: object.tag.clone(),
                        kind,
                    }
                    .into());
                }
                (None, kind) => {
                    flowsheet.add_object(&object.tag, kind)?;
                }
            }
        }
        debug!(
            "Flowsheet built with {} object(s) and {} dependent phase(s).",
            flowsheet.objects_iter().count(),
            flowsheet.dependent_count()
        );
        Ok(flowsheet)
    }
}
