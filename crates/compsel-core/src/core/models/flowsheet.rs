use super::compound::{Dependent, DependentLabel, PhaseCompound, PhaseLocalState};
use super::ids::ObjectId;
use super::object::{ObjectKind, SimulationObject};
use super::phase::{Phase, PhaseKind};
use super::selection::SelectedSet;
use crate::core::catalog::registry::Catalog;
use slotmap::SlotMap;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowsheetError {
    #[error("An object tagged '{0}' already exists in the flowsheet")]
    DuplicateTag(String),

    #[error("No object tagged '{0}' exists in the flowsheet")]
    UnknownTag(String),

    #[error("Phase {phase} is listed more than once for stream '{tag}'")]
    DuplicatePhase { tag: String, phase: PhaseKind },

    #[error("Object '{tag}' of kind {kind} cannot carry phases")]
    PhasesNotSupported { tag: String, kind: ObjectKind },

    #[error("Selected compound '{0}' is not part of the catalog")]
    UnknownSelected(String),

    #[error(
        "Phase {object}/{phase} is out of step with the selection (missing: {missing:?}, unexpected: {unexpected:?})"
    )]
    InvariantViolated {
        object: String,
        phase: PhaseKind,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

/// A simulation context: the compound catalog, the selected compounds and the
/// simulation objects whose phases mirror that selection.
///
/// Every phase of every material stream holds exactly one compound entry per
/// selected name. Streams are created already populated with the current
/// selection, and the selection itself can only be changed through the
/// selection synchronizer, which updates all phases in the same operation.
#[derive(Debug, Clone)]
pub struct Flowsheet {
    /// Shared, read-only catalog of available compounds.
    catalog: Arc<Catalog>,
    /// Compounds active in this simulation.
    selected: SelectedSet,
    /// Primary storage for simulation objects.
    objects: SlotMap<ObjectId, SimulationObject>,
    /// Lookup map for finding objects by their tag.
    tag_map: HashMap<String, ObjectId>,
}

impl Flowsheet {
    /// Creates an empty flowsheet with nothing selected.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            selected: SelectedSet::new(),
            objects: SlotMap::with_key(),
            tag_map: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns a new handle to the shared catalog.
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn selected(&self) -> &SelectedSet {
        &self.selected
    }

    pub fn object(&self, id: ObjectId) -> Option<&SimulationObject> {
        self.objects.get(id)
    }

    pub fn objects_iter(&self) -> impl Iterator<Item = (ObjectId, &SimulationObject)> {
        self.objects.iter()
    }

    /// Iterates over the objects that carry per-phase compound collections.
    pub fn material_streams_iter(&self) -> impl Iterator<Item = (ObjectId, &SimulationObject)> {
        self.objects.iter().filter(|(_, o)| o.has_phases())
    }

    pub fn find_object_by_tag(&self, tag: &str) -> Option<ObjectId> {
        self.tag_map.get(tag).copied()
    }

    /// Mutable access to the phase-local state of one compound.
    ///
    /// Only the state is exposed; membership of a phase is owned by the
    /// selection synchronizer.
    pub fn compound_state_mut(
        &mut self,
        id: ObjectId,
        phase: PhaseKind,
        name: &str,
    ) -> Option<&mut PhaseLocalState> {
        self.objects
            .get_mut(id)?
            .phase_mut(phase)?
            .compound_mut(name)
            .map(|compound| &mut compound.state)
    }

    /// Adds a material stream carrying every standard phase.
    pub fn add_material_stream(&mut self, tag: &str) -> Result<ObjectId, FlowsheetError> {
        self.add_material_stream_with_phases(tag, &PhaseKind::STANDARD)
    }

    /// Adds a material stream carrying the given phases.
    ///
    /// Each phase is populated with the current selection so that the new stream
    /// is consistent from the moment it exists.
    pub fn add_material_stream_with_phases(
        &mut self,
        tag: &str,
        phases: &[PhaseKind],
    ) -> Result<ObjectId, FlowsheetError> {
        if self.tag_map.contains_key(tag) {
            return Err(FlowsheetError::DuplicateTag(tag.to_string()));
        }

        let mut seen = BTreeSet::new();
        let mut object = SimulationObject::new(tag, ObjectKind::MaterialStream);
        for &kind in phases {
            if !seen.insert(kind) {
                return Err(FlowsheetError::DuplicatePhase {
                    tag: tag.to_string(),
                    phase: kind,
                });
            }
            let mut phase = Phase::new(kind);
            for (name, entry) in self.selected.iter() {
                phase
                    .compounds
                    .insert(name.to_string(), PhaseCompound::new(Arc::clone(entry)));
            }
            object.phases.push(phase);
        }

        let id = self.objects.insert(object);
        self.tag_map.insert(tag.to_string(), id);
        Ok(id)
    }

    /// Adds an object of any kind. Material streams get the standard phases.
    pub fn add_object(&mut self, tag: &str, kind: ObjectKind) -> Result<ObjectId, FlowsheetError> {
        if kind == ObjectKind::MaterialStream {
            return self.add_material_stream(tag);
        }
        if self.tag_map.contains_key(tag) {
            return Err(FlowsheetError::DuplicateTag(tag.to_string()));
        }
        let id = self.objects.insert(SimulationObject::new(tag, kind));
        self.tag_map.insert(tag.to_string(), id);
        Ok(id)
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Option<SimulationObject> {
        let object = self.objects.remove(id)?;
        self.tag_map.remove(&object.tag);
        Some(object)
    }

    pub fn remove_object_by_tag(&mut self, tag: &str) -> Result<SimulationObject, FlowsheetError> {
        let id = self
            .find_object_by_tag(tag)
            .ok_or_else(|| FlowsheetError::UnknownTag(tag.to_string()))?;
        self.remove_object(id)
            .ok_or_else(|| FlowsheetError::UnknownTag(tag.to_string()))
    }

    /// Splits the flowsheet into the pieces the selection synchronizer drives:
    /// the catalog, the selected set, and one dependent per phase of every
    /// material stream.
    pub(crate) fn sync_parts(&mut self) -> (&Catalog, &mut SelectedSet, Vec<Dependent<'_>>) {
        let Self {
            catalog,
            selected,
            objects,
            ..
        } = self;

        let dependents = objects
            .values_mut()
            .filter(|object| object.has_phases())
            .flat_map(|object| {
                let tag = object.tag.as_str();
                object.phases.iter_mut().map(move |phase| {
                    let label = DependentLabel::new(tag, &phase.kind.to_string());
                    Dependent::new(label, phase)
                })
            })
            .collect();

        (&**catalog, selected, dependents)
    }

    /// Number of dependent phase collections a toggle has to update.
    pub fn dependent_count(&self) -> usize {
        self.material_streams_iter()
            .map(|(_, object)| object.phases.len())
            .sum()
    }

    /// Verifies that every selected name is in the catalog and that every phase
    /// of every material stream holds exactly the selected names.
    pub fn check_consistency(&self) -> Result<(), FlowsheetError> {
        if let Some(name) = self.selected.names().find(|n| !self.catalog.contains(n)) {
            return Err(FlowsheetError::UnknownSelected(name.to_string()));
        }

        for (_, object) in self.material_streams_iter() {
            for phase in &object.phases {
                let missing: Vec<String> = self
                    .selected
                    .names()
                    .filter(|n| !phase.compounds.contains_key(*n))
                    .map(str::to_string)
                    .collect();
                let unexpected: Vec<String> = phase
                    .names()
                    .filter(|n| !self.selected.contains(n))
                    .map(str::to_string)
                    .collect();
                if !missing.is_empty() || !unexpected.is_empty() {
                    return Err(FlowsheetError::InvariantViolated {
                        object: object.tag.clone(),
                        phase: phase.kind,
                        missing,
                        unexpected,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::entry::CatalogEntry;

    fn test_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::from_entries(vec![
                CatalogEntry::new("Water", "H2O", "7732-18-5", "DWSIM"),
                CatalogEntry::new("Methanol", "CH4O", "67-56-1", "ChemSep"),
                CatalogEntry::new("Ethanol", "C2H6O", "64-17-5", "ChemSep"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn flowsheet_creation_and_access() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        let feed = flowsheet.add_material_stream("FEED").unwrap();
        let duty = flowsheet.add_object("Q-1", ObjectKind::EnergyStream).unwrap();
        let mixer = flowsheet.add_object("MIX-1", ObjectKind::UnitOperation).unwrap();

        assert_eq!(flowsheet.objects_iter().count(), 3);
        assert_eq!(flowsheet.material_streams_iter().count(), 1);
        assert_eq!(flowsheet.find_object_by_tag("FEED"), Some(feed));
        assert_eq!(flowsheet.find_object_by_tag("Q-1"), Some(duty));
        assert!(flowsheet.find_object_by_tag("nope").is_none());

        assert_eq!(flowsheet.object(feed).unwrap().phases().len(), PhaseKind::STANDARD.len());
        assert!(flowsheet.object(duty).unwrap().phases().is_empty());
        assert!(!flowsheet.object(mixer).unwrap().has_phases());
        assert_eq!(flowsheet.dependent_count(), PhaseKind::STANDARD.len());
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        flowsheet.add_material_stream("S1").unwrap();
        assert_eq!(
            flowsheet.add_object("S1", ObjectKind::UnitOperation),
            Err(FlowsheetError::DuplicateTag("S1".to_string()))
        );
    }

    #[test]
    fn duplicate_phases_are_rejected() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        let result = flowsheet
            .add_material_stream_with_phases("S1", &[PhaseKind::Vapor, PhaseKind::Vapor]);
        assert!(matches!(result, Err(FlowsheetError::DuplicatePhase { .. })));
        assert!(flowsheet.find_object_by_tag("S1").is_none());
    }

    #[test]
    fn new_streams_are_populated_with_the_current_selection() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        let water = Arc::clone(flowsheet.catalog().get("Water").unwrap());
        flowsheet.selected.insert(Arc::clone(&water));

        let id = flowsheet
            .add_material_stream_with_phases("S1", &[PhaseKind::Mixture, PhaseKind::Vapor])
            .unwrap();

        let stream = flowsheet.object(id).unwrap();
        for phase in stream.phases() {
            assert_eq!(phase.names().collect::<Vec<_>>(), vec!["Water"]);
            assert!(Arc::ptr_eq(&phase.compound("Water").unwrap().constants, &water));
        }
        assert!(flowsheet.check_consistency().is_ok());
    }

    #[test]
    fn removing_an_object_frees_its_tag() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        let id = flowsheet.add_material_stream("S1").unwrap();
        let removed = flowsheet.remove_object(id).unwrap();
        assert_eq!(removed.tag, "S1");
        assert!(flowsheet.find_object_by_tag("S1").is_none());
        assert!(flowsheet.add_material_stream("S1").is_ok());
    }

    #[test]
    fn sync_parts_enumerates_every_phase_of_every_material_stream() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        flowsheet
            .add_material_stream_with_phases("S1", &[PhaseKind::Mixture, PhaseKind::Vapor])
            .unwrap();
        flowsheet
            .add_material_stream_with_phases("S2", &[PhaseKind::Aqueous])
            .unwrap();
        flowsheet.add_object("Q-1", ObjectKind::EnergyStream).unwrap();

        let (_, _, dependents) = flowsheet.sync_parts();
        let mut labels: Vec<String> = dependents.iter().map(|d| d.label.to_string()).collect();
        labels.sort();
        assert_eq!(labels, vec!["S1/Mixture", "S1/Vapor", "S2/Aqueous"]);
    }

    #[test]
    fn compound_state_is_mutable_without_touching_membership() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        let water = Arc::clone(flowsheet.catalog().get("Water").unwrap());
        flowsheet.selected.insert(water);
        let id = flowsheet.add_material_stream("S1").unwrap();

        let state = flowsheet
            .compound_state_mut(id, PhaseKind::Vapor, "Water")
            .unwrap();
        state.mole_fraction = Some(1.0);

        let phase = flowsheet.object(id).unwrap().phase(PhaseKind::Vapor).unwrap();
        assert_eq!(phase.compound("Water").unwrap().state.mole_fraction, Some(1.0));
        assert!(
            flowsheet
                .compound_state_mut(id, PhaseKind::Vapor, "Ethanol")
                .is_none()
        );
    }

    #[test]
    fn check_consistency_reports_out_of_step_phases() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        let id = flowsheet
            .add_material_stream_with_phases("S1", &[PhaseKind::Liquid1])
            .unwrap();
        let methanol = Arc::clone(flowsheet.catalog().get("Methanol").unwrap());
        flowsheet.selected.insert(methanol);

        let error = flowsheet.check_consistency().unwrap_err();
        assert_eq!(
            error,
            FlowsheetError::InvariantViolated {
                object: "S1".to_string(),
                phase: PhaseKind::Liquid1,
                missing: vec!["Methanol".to_string()],
                unexpected: vec![],
            }
        );

        flowsheet.remove_object(id);
        assert!(flowsheet.check_consistency().is_ok());
    }

    #[test]
    fn check_consistency_reports_selected_names_missing_from_catalog() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        flowsheet
            .selected
            .insert(Arc::new(CatalogEntry::new("Unobtainium", "Uo", "", "")));
        assert_eq!(
            flowsheet.check_consistency(),
            Err(FlowsheetError::UnknownSelected("Unobtainium".to_string()))
        );
    }

    #[test]
    fn sync_parts_yields_one_dependent_per_stream_phase() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        flowsheet.add_material_stream("FEED").unwrap();
        flowsheet
            .add_material_stream_with_phases("TOP", &[PhaseKind::Vapor])
            .unwrap();
        flowsheet.add_object("Q-1", ObjectKind::EnergyStream).unwrap();

        let (catalog, selected, dependents) = flowsheet.sync_parts();
        assert_eq!(catalog.len(), 3);
        assert!(selected.is_empty());
        assert_eq!(dependents.len(), PhaseKind::STANDARD.len() + 1);
        assert!(
            dependents
                .iter()
                .any(|d| d.label == DependentLabel::new("TOP", "Vapor"))
        );
    }

    #[test]
    fn remove_object_by_tag_rejects_unknown_tags() {
        let mut flowsheet = Flowsheet::new(test_catalog());
        flowsheet.add_material_stream("S1").unwrap();

        let removed = flowsheet.remove_object_by_tag("S1").unwrap();
        assert_eq!(removed.tag, "S1");
        assert_eq!(
            flowsheet.remove_object_by_tag("S1").unwrap_err(),
            FlowsheetError::UnknownTag("S1".to_string())
        );
        assert_eq!(flowsheet.objects_iter().count(), 0);
    }
}
