use super::phase::{Phase, PhaseKind};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    MaterialStream,
    EnergyStream,
    UnitOperation,
}

#[derive(Debug, Error)]
#[error("Invalid object kind string")]
pub struct ParseObjectKindError;

impl FromStr for ObjectKind {
    type Err = ParseObjectKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "material-stream" | "materialstream" => Ok(ObjectKind::MaterialStream),
            "energy-stream" | "energystream" => Ok(ObjectKind::EnergyStream),
            "unit-operation" | "unitoperation" => Ok(ObjectKind::UnitOperation),
            _ => Err(ParseObjectKindError),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ObjectKind::MaterialStream => "MaterialStream",
                ObjectKind::EnergyStream => "EnergyStream",
                ObjectKind::UnitOperation => "UnitOperation",
            }
        )
    }
}

#[derive(Debug, Clone)]
pub struct SimulationObject {
    pub tag: String, // Unique, user-visible identifier (e.g., "MSTR-001")
    pub kind: ObjectKind,
    pub(crate) phases: Vec<Phase>, // Empty unless the object is a material stream
}

impl SimulationObject {
    pub(crate) fn new(tag: &str, kind: ObjectKind) -> Self {
        Self {
            tag: tag.to_string(),
            kind,
            phases: Vec::new(),
        }
    }

    /// Only material streams carry per-phase compound collections.
    pub fn has_phases(&self) -> bool {
        self.kind == ObjectKind::MaterialStream
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn phase(&self, kind: PhaseKind) -> Option<&Phase> {
        self.phases.iter().find(|p| p.kind == kind)
    }

    pub fn phase_mut(&mut self, kind: PhaseKind) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|p| p.kind == kind)
    }
}
