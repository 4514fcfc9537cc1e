use std::path::Path;

use crate::error::Result;
use crate::table::Table;

/// Write the table as CSV (or TSV when the output extension is .tsv).
/// Hidden columns are excluded unless `include_hidden`; cell contents,
/// sentinel placeholders included, pass through verbatim.
pub fn write_table(path: &Path, table: &Table, include_hidden: bool) -> Result<()> {
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    };
    let columns: Vec<usize> = if include_hidden {
        (0..table.columns.len()).collect()
    } else {
        table.visible_column_indices()
    };

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;
    for row in 0..table.rows.len() {
        let record: Vec<&str> = columns.iter().map(|&c| table.cell(row, c)).collect();
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
