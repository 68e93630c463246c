use super::error::SyncError;
use super::events::{EventReporter, SelectionEvent};
use super::transaction::{AppliedChange, PropagationJournal};
use crate::core::catalog::registry::Catalog;
use crate::core::models::compound::{CompoundSetError, Dependent, DependentLabel, PhaseCompound};
use crate::core::models::flowsheet::Flowsheet;
use crate::core::models::selection::SelectedSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Membership of a compound in the selected set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Membership {
    Selected,
    Unselected,
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Membership::Selected => "selected",
                Membership::Unselected => "unselected",
            }
        )
    }
}

/// Flips the membership of `name` and propagates the change to every dependent.
///
/// The new state is decided by the current membership in `selected`, never by a
/// requested value: a selected compound becomes unselected and vice versa.
///
/// Selecting requires `name` to be in `catalog`; each dependent receives a new
/// compound entry referencing the catalog's constant properties. Deselecting
/// removes the entry from every dependent, and a dependent that already lacks it
/// is left alone.
///
/// The toggle is atomic. If any dependent fails, every change made so far
/// (including the change to `selected`) is reverted before the error is
/// returned.
///
/// # Return
///
/// The membership of `name` after the toggle.
#[instrument(skip_all, fields(compound = name, dependents = dependents.len()))]
pub fn toggle(
    name: &str,
    selected: &mut SelectedSet,
    catalog: &Catalog,
    dependents: &mut [Dependent<'_>],
    reporter: &EventReporter,
) -> Result<Membership, SyncError> {
    if selected.contains(name) {
        deselect(name, selected, dependents, reporter)
    } else {
        select(name, selected, catalog, dependents, reporter)
    }
}

/// Toggles `name` in a flowsheet, updating every phase of every material stream.
pub fn toggle_compound(
    flowsheet: &mut Flowsheet,
    name: &str,
    reporter: &EventReporter,
) -> Result<Membership, SyncError> {
    let (catalog, selected, mut dependents) = flowsheet.sync_parts();
    toggle(name, selected, catalog, &mut dependents, reporter)
}

fn select(
    name: &str,
    selected: &mut SelectedSet,
    catalog: &Catalog,
    dependents: &mut [Dependent<'_>],
    reporter: &EventReporter,
) -> Result<Membership, SyncError> {
    let entry = catalog
        .get(name)
        .cloned()
        .ok_or_else(|| SyncError::UnknownCompound(name.to_string()))?;

    selected.insert(Arc::clone(&entry));

    let mut journal = PropagationJournal::new(name);
    let mut failure: Option<(usize, CompoundSetError)> = None;
    for (index, dependent) in dependents.iter_mut().enumerate() {
        match dependent
            .compounds
            .insert(PhaseCompound::new(Arc::clone(&entry)))
        {
            Ok(()) => journal.record(AppliedChange::Inserted(index)),
            Err(e) => {
                failure = Some((index, e));
                break;
            }
        }
    }

    if let Some((index, source)) = failure {
        let rollback_failures = journal.rollback(dependents);
        selected.remove(name);
        return Err(abort(
            name,
            Membership::Selected,
            dependents,
            index,
            source,
            rollback_failures,
            reporter,
        ));
    }

    debug!("Selected '{}' in {} dependent(s).", name, dependents.len());
    reporter.report(SelectionEvent::CompoundSelected {
        name: name.to_string(),
        dependents: dependents.len(),
    });
    Ok(Membership::Selected)
}

fn deselect(
    name: &str,
    selected: &mut SelectedSet,
    dependents: &mut [Dependent<'_>],
    reporter: &EventReporter,
) -> Result<Membership, SyncError> {
    let removed_entry = selected.remove(name);

    let mut journal = PropagationJournal::new(name);
    let mut failure: Option<(usize, CompoundSetError)> = None;
    for (index, dependent) in dependents.iter_mut().enumerate() {
        match dependent.compounds.remove(name) {
            Ok(Some(compound)) => journal.record(AppliedChange::Removed(index, compound)),
            Ok(None) => debug!("'{}' already absent from {}.", name, dependent.label),
            Err(e) => {
                failure = Some((index, e));
                break;
            }
        }
    }

    if let Some((index, source)) = failure {
        let rollback_failures = journal.rollback(dependents);
        if let Some(entry) = removed_entry {
            selected.insert(entry);
        }
        return Err(abort(
            name,
            Membership::Unselected,
            dependents,
            index,
            source,
            rollback_failures,
            reporter,
        ));
    }

    debug!("Deselected '{}' in {} dependent(s).", name, dependents.len());
    reporter.report(SelectionEvent::CompoundDeselected {
        name: name.to_string(),
        dependents: dependents.len(),
    });
    Ok(Membership::Unselected)
}

fn abort(
    name: &str,
    target: Membership,
    dependents: &[Dependent<'_>],
    failed_index: usize,
    source: CompoundSetError,
    rollback_failures: Vec<(DependentLabel, CompoundSetError)>,
    reporter: &EventReporter,
) -> SyncError {
    let dependent = dependents[failed_index].label.clone();
    warn!(
        "Toggling '{}' failed at {}: {}. Rolling back.",
        name, dependent, source
    );
    reporter.report(SelectionEvent::RolledBack {
        name: name.to_string(),
        failed_at: dependent.clone(),
    });

    if rollback_failures.is_empty() {
        SyncError::Propagation {
            name: name.to_string(),
            target,
            dependent,
            source,
        }
    } else {
        warn!(
            "Rollback of '{}' failed for {} dependent(s).",
            name,
            rollback_failures.len()
        );
        SyncError::RollbackFailed {
            name: name.to_string(),
            target,
            dependent,
            source,
            rollback_failures,
        }
    }
}
