use compsel::core::models::flowsheet::Flowsheet;
use compsel::engine::view::{ViewColumn, ViewItem};
use std::fmt::Write;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Table row for the search view
#[derive(Tabled)]
struct ViewRow {
    #[tabled(rename = "Added")]
    added: String,
    #[tabled(rename = "Compound")]
    compound: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "CAS Number")]
    cas_number: String,
    #[tabled(rename = "Database")]
    database: String,
}

impl From<&ViewItem> for ViewRow {
    fn from(item: &ViewItem) -> Self {
        Self {
            added: item.cell(ViewColumn::Added).to_string(),
            compound: item.cell(ViewColumn::Compound).to_string(),
            formula: item.cell(ViewColumn::Formula).to_string(),
            cas_number: item.cell(ViewColumn::CasNumber).to_string(),
            database: item.cell(ViewColumn::Database).to_string(),
        }
    }
}

/// Renders view rows as a table, in view order.
pub fn render_view(items: &[ViewItem]) -> String {
    let rows: Vec<ViewRow> = items.iter().map(ViewRow::from).collect();
    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

/// Summarises the selection and how many compounds each material stream phase holds.
pub fn render_selection(flowsheet: &Flowsheet) -> String {
    let mut out = String::new();
    let names: Vec<&str> = flowsheet.selected().names().collect();
    if names.is_empty() {
        let _ = writeln!(out, "Selected compounds: (none)");
    } else {
        let _ = writeln!(
            out,
            "Selected compounds ({}): {}",
            names.len(),
            names.join(", ")
        );
    }

    for (_, object) in flowsheet.material_streams_iter() {
        let phases: Vec<String> = object
            .phases()
            .iter()
            .map(|phase| format!("{}={}", phase.kind, phase.len()))
            .collect();
        let _ = writeln!(out, "  {}: {}", object.tag, phases.join(" "));
    }
    out
}
