use crate::model::DataTable;
use crate::record::Value;

fn wrap_cell_content(c: &str) -> String {
    let needs_escaping = c.contains('"');
    let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',');
    let mut out = String::from(c);

    if needs_escaping {
        out = out.replace('"', "\"\"");
    }
    if needs_wrapping || needs_escaping {
        out = format!("\"{out}\"");
    }
    out
}

fn csv_cell(value: Option<&Value>) -> String {
    value
        .map(|v| wrap_cell_content(&v.to_string()))
        .unwrap_or_default()
}

/// Selected records as CSV: a header of the visible fields, then one line per
/// selected record in collection order. Missing values are empty cells.
pub fn selected_as_csv(table: &DataTable) -> String {
    let header = table
        .visible_fields()
        .iter()
        .map(|f| wrap_cell_content(&f.field))
        .collect::<Vec<_>>()
        .join(",");
    let mut lines = vec![header];
    for record in table.items().iter().filter(|r| table.is_selected(r)) {
        let row = table
            .visible_cells(record)
            .into_iter()
            .map(|(_, value)| csv_cell(value))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }
    lines.join("\n")
}
