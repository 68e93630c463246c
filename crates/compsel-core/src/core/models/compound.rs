use crate::core::catalog::entry::CatalogEntry;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Phase-local state of a compound.
///
/// Every quantity starts out unset; they are computed by a solver outside this
/// library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseLocalState {
    pub mole_fraction: Option<f64>,
    pub mass_fraction: Option<f64>,
    pub molar_flow: Option<f64>,
    pub mass_flow: Option<f64>,
}

/// A compound as it exists inside one phase of one stream.
#[derive(Debug, Clone)]
pub struct PhaseCompound {
    pub name: String,
    pub constants: Arc<CatalogEntry>,
    pub state: PhaseLocalState,
}

impl PhaseCompound {
    /// Creates an entry referencing `constants` with defaulted phase-local state.
    pub fn new(constants: Arc<CatalogEntry>) -> Self {
        Self {
            name: constants.name.clone(),
            constants,
            state: PhaseLocalState::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompoundSetError {
    #[error("Compound '{0}' is already present in this collection")]
    Duplicate(String),
    #[error("Collection rejected the change to compound '{name}': {reason}")]
    Rejected { name: String, reason: String },
}

/// A mutable, name-keyed collection of phase compounds.
///
/// This is the seam between the selection synchronizer and whatever object
/// model owns the per-phase compound lists.
pub trait CompoundCollection {
    fn contains(&self, name: &str) -> bool;

    /// Inserts `compound` under its name. Inserting a name that is already
    /// present is an error.
    fn insert(&mut self, compound: PhaseCompound) -> Result<(), CompoundSetError>;

    /// Removes the compound named `name`, returning it if it was present.
    /// Removing an absent name succeeds with `None`.
    fn remove(&mut self, name: &str) -> Result<Option<PhaseCompound>, CompoundSetError>;
}

/// Identifies one dependent collection in error messages and events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependentLabel {
    pub object: String,
    pub phase: String,
}

impl DependentLabel {
    pub fn new(object: &str, phase: &str) -> Self {
        Self {
            object: object.to_string(),
            phase: phase.to_string(),
        }
    }
}

impl fmt::Display for DependentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.object, self.phase)
    }
}

/// A borrowed dependent collection together with its label.
pub struct Dependent<'a> {
    pub label: DependentLabel,
    pub compounds: &'a mut dyn CompoundCollection,
}

impl<'a> Dependent<'a> {
    pub fn new(label: DependentLabel, compounds: &'a mut dyn CompoundCollection) -> Self {
        Self { label, compounds }
    }
}

impl fmt::Debug for Dependent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependent")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
