use std::path::PathBuf;

use colored::Colorize;
use comfy_table::Table as DisplayTable;

use crate::error::{Result, TabfxError};
use crate::guess::suggest_roles;
use crate::reader::read_rows;
use crate::settings::load_settings;
use crate::table::Table;

const PREVIEW_ROWS: usize = 8;

pub fn run(file: &str) -> Result<()> {
    let rows = read_rows(&PathBuf::from(file))?;
    let settings = load_settings();
    let table = Table::from_rows(rows, &settings.header_mode())
        .ok_or_else(|| TabfxError::Other(format!("{file} contains no rows")))?;

    println!(
        "Header row at index {} ({} columns)",
        table.header_index.to_string().bold(),
        table.columns.len()
    );

    let roles = suggest_roles(&table);
    let show = |role: &Option<String>| match role {
        Some(title) => title.green().to_string(),
        None => "none found".yellow().to_string(),
    };
    println!("Date column:     {}", show(&roles.date_column));
    println!("Amount column:   {}", show(&roles.amount_column));
    println!("Currency column: {}", show(&roles.currency_column));

    let mut preview = DisplayTable::new();
    preview.set_header(table.columns.iter().map(|c| c.title.clone()));
    for row in table.data_row_indices().take(PREVIEW_ROWS) {
        preview.add_row((0..table.columns.len()).map(|c| table.cell(row, c).to_string()));
    }
    println!("{preview}");
    Ok(())
}
