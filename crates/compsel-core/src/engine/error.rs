use super::config::ConfigError;
use super::sync::Membership;
use crate::core::catalog::registry::CatalogLoadError;
use crate::core::io::layout::LayoutLoadError;
use crate::core::models::compound::{CompoundSetError, DependentLabel};
use crate::core::models::flowsheet::FlowsheetError;
use thiserror::Error;

/// Failures of a single toggle.
///
/// A toggle either completes on every dependent or leaves the selected set and
/// all dependents exactly as they were; these errors report why it did not
/// complete.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Compound '{0}' is not in the catalog")]
    UnknownCompound(String),

    #[error(
        "Could not make compound '{name}' {target} in {dependent}: {source}; the toggle was rolled back"
    )]
    Propagation {
        name: String,
        target: Membership,
        dependent: DependentLabel,
        source: CompoundSetError,
    },

    #[error(
        "Could not make compound '{name}' {target} in {dependent}: {source}; rollback failed for {} dependent(s)",
        .rollback_failures.len()
    )]
    RollbackFailed {
        name: String,
        target: Membership,
        dependent: DependentLabel,
        source: CompoundSetError,
        rollback_failures: Vec<(DependentLabel, CompoundSetError)>,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Catalog loading failed: {source}")]
    Catalog {
        #[from]
        source: CatalogLoadError,
    },

    #[error("Flowsheet layout loading failed: {source}")]
    Layout {
        #[from]
        source: LayoutLoadError,
    },

    #[error(transparent)]
    Flowsheet(#[from] FlowsheetError),

    #[error("Selection update failed: {source}")]
    Sync {
        #[from]
        source: SyncError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
