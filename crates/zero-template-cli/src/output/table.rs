//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// One marker of a template outline.
pub struct MarkerRow {
    /// Marker kind: "each", "for" or "var".
    pub kind: String,
    /// Block target or variable path.
    pub target: String,
    pub line: usize,
    pub column: usize,
}

/// Format outline rows as an ASCII table.
pub fn format_marker_table(rows: &[MarkerRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Target", "Position"]);

    for row in rows {
        table.add_row(vec![
            row.kind.clone(),
            row.target.clone(),
            format!("{}:{}", row.line, row.column),
        ]);
    }

    table
}
