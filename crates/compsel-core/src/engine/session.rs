use super::error::SyncError;
use super::events::{EventReporter, SelectionEvent};
use super::filter::filter_catalog;
use super::sync::{self, Membership};
use super::view::{ViewItem, build_view};
use crate::core::catalog::entry::CatalogEntry;
use crate::core::catalog::registry::Catalog;
use crate::core::models::flowsheet::Flowsheet;
use crate::core::models::selection::SelectedSet;
use std::sync::Arc;
use tracing::debug;

/// A request to filter the catalog for one revision of the search text.
///
/// Tickets are numbered in the order they are issued; only the result of the
/// most recently issued ticket may be applied to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    query: String,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Runs the filter for this ticket. Pure; safe to run anywhere.
    pub fn execute(self, catalog: &Catalog) -> FilterOutcome {
        let entries = filter_catalog(catalog, &self.query);
        FilterOutcome {
            ticket: self,
            entries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterOutcome {
    ticket: QueryTicket,
    entries: Vec<Arc<CatalogEntry>>,
}

impl FilterOutcome {
    pub fn ticket(&self) -> &QueryTicket {
        &self.ticket
    }

    pub fn entries(&self) -> &[Arc<CatalogEntry>] {
        &self.entries
    }
}

/// Presentation-facing state of the compound selection panel.
///
/// The editor owns the search text, the current filter result and the view
/// built from it. It receives the two events the presentation layer emits:
/// query changes and toggles. After either, the view is rebuilt against the
/// current selection.
#[derive(Debug, Clone)]
pub struct CompoundEditor {
    catalog: Arc<Catalog>,
    query: String,
    issued: u64,
    applied: u64,
    filtered: Vec<Arc<CatalogEntry>>,
    view: Vec<ViewItem>,
}

impl CompoundEditor {
    /// Creates an editor showing the full catalog for `flowsheet`.
    pub fn new(flowsheet: &Flowsheet) -> Self {
        let catalog = flowsheet.shared_catalog();
        let filtered = filter_catalog(&catalog, "");
        let view = build_view(&filtered, flowsheet.selected());
        Self {
            catalog,
            query: String::new(),
            issued: 0,
            applied: 0,
            filtered,
            view,
        }
    }

    /// Records a change of the search text and returns the ticket to filter it.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn query_changed(&mut self, text: &str) -> QueryTicket {
        self.issued += 1;
        QueryTicket {
            generation: self.issued,
            query: text.to_string(),
        }
    }

    /// Applies a filter result if it belongs to the latest ticket.
    ///
    /// Stale results are discarded and reported; the current view is left
    /// untouched. Returns whether the outcome was applied.
    pub fn apply(
        &mut self,
        outcome: FilterOutcome,
        selected: &SelectedSet,
        reporter: &EventReporter,
    ) -> bool {
        let generation = outcome.ticket.generation;
        if generation != self.issued || generation <= self.applied {
            debug!(
                "Discarding filter result {} (latest is {}).",
                generation, self.issued
            );
            reporter.report(SelectionEvent::QueryDiscarded {
                generation,
                latest: self.issued,
            });
            return false;
        }

        self.applied = generation;
        self.query = outcome.ticket.query;
        self.filtered = outcome.entries;
        self.view = build_view(&self.filtered, selected);
        reporter.report(SelectionEvent::QueryApplied {
            generation,
            query: self.query.clone(),
            matches: self.filtered.len(),
        });
        true
    }

    /// Issues, runs and applies a query in one step.
    pub fn set_query(&mut self, text: &str, selected: &SelectedSet, reporter: &EventReporter) {
        let outcome = self.query_changed(text).execute(&self.catalog);
        self.apply(outcome, selected, reporter);
    }

    /// Toggles `name` in `flowsheet` and rebuilds the view.
    ///
    /// On error the flowsheet is unchanged and so is the view.
    pub fn toggle(
        &mut self,
        flowsheet: &mut Flowsheet,
        name: &str,
        reporter: &EventReporter,
    ) -> Result<Membership, SyncError> {
        let membership = sync::toggle_compound(flowsheet, name, reporter)?;
        self.refresh(flowsheet.selected());
        Ok(membership)
    }

    /// Rebuilds the view from the current filter result.
    pub fn refresh(&mut self, selected: &SelectedSet) {
        self.view = build_view(&self.filtered, selected);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn view(&self) -> &[ViewItem] {
        &self.view
    }

    /// Number of compounds available in the catalog, regardless of the filter.
    pub fn available_count(&self) -> usize {
        self.catalog.len()
    }
}
