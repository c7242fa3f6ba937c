use crate::normalizer::{NormalizedRow, COLUMNS};

/// Format a numeric cell without a trailing `.0` for whole values.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn row_cells(row: &NormalizedRow) -> [String; 15] {
    [
        row.name.clone(),
        row.month.map(|m| m.to_string()).unwrap_or_default(),
        row.year.map(|y| y.to_string()).unwrap_or_default(),
        row.commodity_name.clone(),
        row.product_name.clone().unwrap_or_default(),
        row.location_name.clone(),
        row.typ.clone(),
        row.classificat.clone(),
        format_number(row.value),
        row.unit.clone(),
        row.hs_code.clone().unwrap_or_default(),
        row.source.clone(),
        row.hs_code_reference.clone(),
        row.country.clone(),
        row.pelabuhan.clone(),
    ]
}

/// Render normalized rows as a column-aligned text table, header first.
///
/// Column order follows [`COLUMNS`] regardless of input. Empty optional
/// fields render as blank cells.
pub fn render_table(rows: &[NormalizedRow]) -> String {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    let cell_rows: Vec<[String; 15]> = rows.iter().map(row_cells).collect();

    for cells in &cell_rows {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[String]| {
        let line = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    push_line(&header);
    for cells in &cell_rows {
        push_line(cells);
    }

    out
}
