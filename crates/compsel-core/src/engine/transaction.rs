use crate::core::models::compound::{CompoundSetError, Dependent, DependentLabel, PhaseCompound};

/// A change that was applied to one dependent during propagation.
#[derive(Debug)]
pub(crate) enum AppliedChange {
    /// The compound was inserted into the dependent at this index.
    Inserted(usize),
    /// The compound was removed from the dependent at this index.
    Removed(usize, PhaseCompound),
}

/// Records every change a toggle makes to its dependents so that a failure
/// part-way through can be undone.
#[derive(Debug)]
pub(crate) struct PropagationJournal {
    name: String,
    applied: Vec<AppliedChange>,
}

impl PropagationJournal {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            applied: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, change: AppliedChange) {
        self.applied.push(change);
    }

    /// Reverts the recorded changes, most recent first.
    ///
    /// Every change is attempted even if an earlier revert fails; the failures
    /// are returned so the caller can report them.
    pub(crate) fn rollback(
        self,
        dependents: &mut [Dependent<'_>],
    ) -> Vec<(DependentLabel, CompoundSetError)> {
        let mut failures = Vec::new();
        for change in self.applied.into_iter().rev() {
            match change {
                AppliedChange::Inserted(index) => {
                    let dependent = &mut dependents[index];
                    if let Err(e) = dependent.compounds.remove(&self.name) {
                        failures.push((dependent.label.clone(), e));
                    }
                }
                AppliedChange::Removed(index, compound) => {
                    let dependent = &mut dependents[index];
                    if let Err(e) = dependent.compounds.insert(compound) {
                        failures.push((dependent.label.clone(), e));
                    }
                }
            }
        }
        failures
    }
}
