//! Column summaries: a comfy-table for the terminal and a plain report.

use std::fmt::Write as _;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tabprep_model::ColumnKind;
use tabprep_transform::Dataset;

/// One row of the column report.
///
/// `kind` is `mixed` for a text column loaded from values of several types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: &'static str,
    pub missing: usize,
}

/// Summaries of every column, ordered by name.
pub fn summarize(dataset: &Dataset) -> Vec<ColumnSummary> {
    let view = dataset.only_maximum();
    view.get_columns()
        .iter()
        .map(|column| {
            let name = column.name().to_string();
            ColumnSummary {
                kind: if dataset.is_mixed(&name) {
                    "mixed"
                } else {
                    dataset.column_kind(&name).map_or("unknown", ColumnKind::label)
                },
                missing: column.null_count(),
                name,
            }
        })
        .collect()
}

/// Plain-text report, one line per column.
pub fn render_report(dataset: &Dataset) -> String {
    let mut out = format!("{} rows x {} columns\n", dataset.height(), dataset.width());
    for summary in summarize(dataset) {
        let _ = writeln!(
            out,
            "{}: {}, {} missing",
            summary.name, summary.kind, summary.missing
        );
    }
    out
}

pub fn print_summary(dataset: &Dataset) {
    println!("Rows: {}", dataset.height());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Kind"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for summary in summarize(dataset) {
        table.add_row(vec![
            Cell::new(&summary.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.kind),
            missing_cell(summary.missing),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn missing_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
