use crate::core::catalog::entry::CatalogEntry;
use crate::core::models::selection::SelectedSet;
use std::fmt;
use std::sync::Arc;

/// One row of the interactive compound list.
///
/// `is_selected` is a snapshot of membership taken when the view was built; it
/// does not follow later changes to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem {
    pub name: String,
    pub formula: String,
    pub cas_number: String,
    pub source_database: String,
    pub is_selected: bool,
}

impl ViewItem {
    fn from_entry(entry: &CatalogEntry, is_selected: bool) -> Self {
        Self {
            name: entry.name.clone(),
            formula: entry.formula.clone(),
            cas_number: entry.cas_number.clone(),
            source_database: entry.source_database.clone(),
            is_selected,
        }
    }

    pub fn cell(&self, column: ViewColumn) -> &str {
        match column {
            ViewColumn::Added => {
                if self.is_selected {
                    "[x]"
                } else {
                    "[ ]"
                }
            }
            ViewColumn::Compound => &self.name,
            ViewColumn::Formula => &self.formula,
            ViewColumn::CasNumber => &self.cas_number,
            ViewColumn::Database => &self.source_database,
        }
    }
}

/// Columns of the compound list, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewColumn {
    Added,
    Compound,
    Formula,
    CasNumber,
    Database,
}

impl ViewColumn {
    pub const ALL: [ViewColumn; 5] = [
        ViewColumn::Added,
        ViewColumn::Compound,
        ViewColumn::Formula,
        ViewColumn::CasNumber,
        ViewColumn::Database,
    ];
}

impl fmt::Display for ViewColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ViewColumn::Added => "Added",
                ViewColumn::Compound => "Compound",
                ViewColumn::Formula => "Formula",
                ViewColumn::CasNumber => "CAS Number",
                ViewColumn::Database => "Database",
            }
        )
    }
}

/// Projects filtered entries into view rows, selected compounds first.
///
/// Within each group the order of `filtered` is preserved.
pub fn build_view(filtered: &[Arc<CatalogEntry>], selected: &SelectedSet) -> Vec<ViewItem> {
    let (chosen, rest): (Vec<&Arc<CatalogEntry>>, Vec<&Arc<CatalogEntry>>) =
        filtered.iter().partition(|entry| selected.contains(&entry.name));

    chosen
        .into_iter()
        .map(|entry| ViewItem::from_entry(entry, true))
        .chain(rest.into_iter().map(|entry| ViewItem::from_entry(entry, false)))
        .collect()
}
