//! Plain-text rendering of column catalogs and catalog rows.

use crate::catalog::CatalogRow;
use crate::metadata::ResultSetMetadata;
use crate::types::Nullability;

const COLUMN_HEADERS: [&str; 7] = ["#", "datasource", "column", "type", "jdbc", "nullable", "label"];

/// Render a column catalog as an aligned table.
///
/// The `label` cell is `-` for columns reachable by position only.
pub fn render_columns(metadata: &ResultSetMetadata) -> String {
    let rows = metadata
        .columns()
        .iter()
        .map(|c| {
            let labelled = metadata.position_of_label(&c.label).ok() == Some(c.ordinal_position);
            vec![
                c.ordinal_position.to_string(),
                c.datasource.clone(),
                c.name.clone(),
                c.primitive_type.to_string(),
                c.relational_type.to_string(),
                nullability_cell(c.nullability).to_string(),
                if labelled { c.label.clone() } else { "-".to_string() },
            ]
        })
        .collect();
    render_table(&COLUMN_HEADERS, rows)
}

/// Render the given fields of catalog rows as an aligned table.
pub fn render_rows(rows: &[CatalogRow], fields: &[&str]) -> String {
    let cells = rows
        .iter()
        .map(|row| {
            fields
                .iter()
                .map(|f| row.get(f).map_or_else(String::new, ToString::to_string))
                .collect()
        })
        .collect();
    render_table(fields, cells)
}

fn nullability_cell(n: Nullability) -> &'static str {
    match n {
        Nullability::NoNulls => "no",
        Nullability::Nullable => "yes",
        Nullability::Unknown => "unknown",
    }
}

fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    for line in std::iter::once(&header).chain(rows.iter()) {
        let mut text = String::new();
        for (i, (cell, width)) in line.iter().zip(&widths).enumerate() {
            if i > 0 {
                text.push_str("  ");
            }
            text.push_str(cell);
            let pad = width - cell.chars().count();
            text.extend(std::iter::repeat(' ').take(pad));
        }
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}
