use super::compound::{CompoundCollection, CompoundSetError, PhaseCompound};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhaseKind {
    Mixture,
    Vapor,
    OverallLiquid,
    Liquid1,
    Liquid2,
    Liquid3,
    Aqueous,
    Solid,
}

impl PhaseKind {
    /// The phases every material stream carries by default, in display order.
    pub const STANDARD: [PhaseKind; 8] = [
        PhaseKind::Mixture,
        PhaseKind::Vapor,
        PhaseKind::OverallLiquid,
        PhaseKind::Liquid1,
        PhaseKind::Liquid2,
        PhaseKind::Liquid3,
        PhaseKind::Aqueous,
        PhaseKind::Solid,
    ];
}

#[derive(Debug, Error)]
#[error("Invalid phase kind string")]
pub struct ParsePhaseKindError;

impl FromStr for PhaseKind {
    type Err = ParsePhaseKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "mixture" => Ok(PhaseKind::Mixture),
            "vapor" => Ok(PhaseKind::Vapor),
            "overall-liquid" | "overallliquid" => Ok(PhaseKind::OverallLiquid),
            "liquid1" | "liquid-1" => Ok(PhaseKind::Liquid1),
            "liquid2" | "liquid-2" => Ok(PhaseKind::Liquid2),
            "liquid3" | "liquid-3" => Ok(PhaseKind::Liquid3),
            "aqueous" => Ok(PhaseKind::Aqueous),
            "solid" => Ok(PhaseKind::Solid),
            _ => Err(ParsePhaseKindError),
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PhaseKind::Mixture => "Mixture",
                PhaseKind::Vapor => "Vapor",
                PhaseKind::OverallLiquid => "OverallLiquid",
                PhaseKind::Liquid1 => "Liquid1",
                PhaseKind::Liquid2 => "Liquid2",
                PhaseKind::Liquid3 => "Liquid3",
                PhaseKind::Aqueous => "Aqueous",
                PhaseKind::Solid => "Solid",
            }
        )
    }
}

#[derive(Debug, Clone)]
pub struct Phase {
    pub kind: PhaseKind,
    pub(crate) compounds: BTreeMap<String, PhaseCompound>, // Keyed by compound name
}

impl Phase {
    pub(crate) fn new(kind: PhaseKind) -> Self {
        Self {
            kind,
            compounds: BTreeMap::new(),
        }
    }

    pub fn compound(&self, name: &str) -> Option<&PhaseCompound> {
        self.compounds.get(name)
    }

    pub fn compound_mut(&mut self, name: &str) -> Option<&mut PhaseCompound> {
        self.compounds.get_mut(name)
    }

    /// Compound names present in this phase, in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.compounds.keys().map(String::as_str)
    }

    pub fn compounds_iter(&self) -> impl Iterator<Item = &PhaseCompound> {
        self.compounds.values()
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

impl CompoundCollection for Phase {
    fn contains(&self, name: &str) -> bool {
        self.compounds.contains_key(name)
    }

    fn insert(&mut self, compound: PhaseCompound) -> Result<(), CompoundSetError> {
        if self.compounds.contains_key(&compound.name) {
            return Err(CompoundSetError::Duplicate(compound.name));
        }
        self.compounds.insert(compound.name.clone(), compound);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<Option<PhaseCompound>, CompoundSetError> {
        Ok(self.compounds.remove(name))
    }
}
